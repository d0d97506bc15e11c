use crate::error::Error;
use crate::storage::Storage;
use crate::types::{AllocationSummary, OfferingStatus, Subscription, SubscriptionStatus};
use soroban_sdk::{Env, Symbol};

pub struct AllocationEngine;

impl AllocationEngine {
    /// Shares granted to a request given what is left in the pool.
    /// Partial fills take priority over rejection.
    pub fn fill_quantity(remaining: i128, requested: i128) -> i128 {
        if remaining <= 0 || requested <= 0 {
            0
        } else if requested < remaining {
            requested
        } else {
            remaining
        }
    }

    /// Settle one subscription against the pool. Returns the settled record
    /// and what is left of the pool afterwards.
    fn settle(
        mut subscription: Subscription,
        remaining: i128,
        now: u64,
    ) -> Result<(Subscription, i128), Error> {
        let granted = Self::fill_quantity(remaining, subscription.quantity);
        if granted == 0 {
            subscription.status = SubscriptionStatus::Rejected;
            subscription.allocation_quantity = 0;
            subscription.allocation_amount = 0;
        } else {
            subscription.status = SubscriptionStatus::Allocated;
            subscription.allocation_quantity = granted;
            subscription.allocation_amount = granted
                .checked_mul(subscription.price_per_share)
                .ok_or(Error::InvalidAmount)?;
        }
        subscription.settled_at = now;

        let left = remaining.checked_sub(granted).ok_or(Error::InvalidAmount)?;
        Ok((subscription, left))
    }

    /// Distribute the share pool of a closed offering first-come-first-served.
    ///
    /// The subscription index is walked twice. The first walk reads every
    /// record and computes every fill; only when it succeeds does the second
    /// walk write. An error leaves the offering and all of its subscriptions
    /// untouched for the next attempt.
    ///
    /// # Errors
    /// - `OfferingNotFound`: Offering doesn't exist
    /// - `AllocationConflict`: Allocation already completed
    /// - `OfferingNotClosed`: Offering has not closed yet
    /// - `SubscriptionNotFound`: Indexed subscription record is missing
    /// - `InvalidAmount`: Arithmetic overflow
    pub fn allocate(env: &Env, offering_id: u32) -> Result<AllocationSummary, Error> {
        let mut offering = Storage::get_offering(env, offering_id)?;

        if offering.allocation_completed {
            return Err(Error::AllocationConflict);
        }
        if offering.status != OfferingStatus::Closed {
            return Err(Error::OfferingNotClosed);
        }

        let now = env.ledger().timestamp();
        // Index order is (created_at, id) order
        let queue = Storage::offering_subscription_ids(env, offering_id);

        // Plan
        let mut remaining = offering.total_shares;
        let mut filled: u32 = 0;
        let mut rejected: u32 = 0;
        for id in queue.iter() {
            let subscription = Storage::get_subscription(env, id)?;
            if !subscription.status.is_reserved() {
                continue;
            }
            let (settled, left) = Self::settle(subscription, remaining, now)?;
            if settled.status == SubscriptionStatus::Allocated {
                filled += 1;
            } else {
                rejected += 1;
            }
            remaining = left;
        }

        let allocated_shares = offering
            .total_shares
            .checked_sub(remaining)
            .ok_or(Error::InvalidAmount)?;

        // Commit
        let mut pool = offering.total_shares;
        for id in queue.iter() {
            let subscription = Storage::get_subscription(env, id)?;
            if !subscription.status.is_reserved() {
                continue;
            }
            let (settled, left) = Self::settle(subscription, pool, now)?;
            Storage::set_subscription(env, &settled);
            pool = left;
        }

        offering.allocated_shares = allocated_shares;
        offering.remaining_shares = remaining;
        offering.allocation_completed = true;
        Storage::move_offering(env, &mut offering, OfferingStatus::Allocated);

        let summary = AllocationSummary {
            offering_id,
            allocated_shares,
            remaining_shares: remaining,
            filled,
            rejected,
        };

        env.events().publish(
            (Symbol::new(env, "allocated"), offering_id),
            summary.clone(),
        );

        Ok(summary)
    }
}
