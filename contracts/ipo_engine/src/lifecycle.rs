use crate::allocation::AllocationEngine;
use crate::error::Error;
use crate::events::{AllocationFailedEvent, PhaseChangedEvent};
use crate::storage::Storage;
use crate::types::{Offering, OfferingStatus, TickReport};
use soroban_sdk::{log, Env, Symbol};

pub struct LifecycleManager;

impl LifecycleManager {
    /// One scheduler tick: promote, close, then allocate closed offerings.
    ///
    /// Safe to call any number of times; with no boundary crossed it changes
    /// nothing. Allocation failures are reported per offering and retried on
    /// the next tick, after the offerings queued behind them.
    pub fn tick(env: &Env) -> TickReport {
        let now = env.ledger().timestamp();
        let mut report = TickReport::default();

        // (a) upcoming -> active
        for id in Storage::phase_index(env, OfferingStatus::Upcoming).iter() {
            let Ok(mut offering) = Storage::get_offering(env, id) else {
                continue;
            };
            if now >= offering.start_date {
                Self::transition(env, &mut offering, OfferingStatus::Active);
                report.promoted += 1;
            }
        }

        // (b) active -> closed
        for id in Storage::phase_index(env, OfferingStatus::Active).iter() {
            let Ok(mut offering) = Storage::get_offering(env, id) else {
                continue;
            };
            if now > offering.end_date {
                Self::transition(env, &mut offering, OfferingStatus::Closed);
                report.closed += 1;
            }
        }

        // (c) closed -> allocated, bounded by offerings and by subscriptions settled
        let limit = Storage::get_max_allocations_per_tick(env);
        let budget = Storage::get_max_subscribers_per_offering(env);
        let mut attempted: u32 = 0;
        let mut settled: u32 = 0;
        for id in Storage::phase_index(env, OfferingStatus::Closed).iter() {
            if attempted >= limit {
                report.deferred += 1;
                continue;
            }
            let queued = Storage::offering_subscription_ids(env, id).len();
            if attempted > 0 && settled.saturating_add(queued) > budget {
                report.deferred += 1;
                continue;
            }
            attempted += 1;
            settled = settled.saturating_add(queued);

            match AllocationEngine::allocate(env, id) {
                Ok(_) => report.allocated += 1,
                Err(Error::AllocationConflict) => {
                    // Already settled elsewhere; just drop the stale index entry
                    Storage::unindex_offering(env, OfferingStatus::Closed, id);
                }
                Err(err) => {
                    report.failed += 1;
                    log!(env, "allocation failed", id, err as u32);
                    env.events().publish(
                        (Symbol::new(env, "alloc_failed"), id),
                        AllocationFailedEvent {
                            offering_id: id,
                            code: err as u32,
                        },
                    );
                    // Retry behind the other closed offerings
                    Storage::unindex_offering(env, OfferingStatus::Closed, id);
                    Storage::index_offering(env, OfferingStatus::Closed, id);
                }
            }
        }

        env.events()
            .publish((Symbol::new(env, "tick"), now), report.clone());

        report
    }

    fn transition(env: &Env, offering: &mut Offering, to: OfferingStatus) {
        let from = offering.status;
        Storage::move_offering(env, offering, to);

        env.events().publish(
            (Symbol::new(env, "phase_changed"), offering.id),
            PhaseChangedEvent {
                offering_id: offering.id,
                from,
                to,
            },
        );
    }
}
