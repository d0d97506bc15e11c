use crate::error::Error;
use crate::events::{OfferingArchivedEvent, OfferingCreatedEvent};
use crate::storage::Storage;
use crate::types::{DataKey, Offering, OfferingStatus, OfferingTerms};
use crate::validation::Validator;
use soroban_sdk::{Address, Env, Symbol};

pub struct Admin;

impl Admin {
    /// Initialize contract with admin and collaborator addresses
    pub fn initialize(
        env: &Env,
        admin: &Address,
        funding_desk: &Address,
        max_allocations_per_tick: u32,
    ) -> Result<(), Error> {
        if Storage::is_initialized(env) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        if max_allocations_per_tick == 0 {
            return Err(Error::InvalidAmount);
        }

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, admin);
        env.storage()
            .instance()
            .set(&DataKey::FundingDesk, funding_desk);
        Storage::set_max_allocations_per_tick(env, max_allocations_per_tick);
        Storage::set_paused(env, false);

        Ok(())
    }

    /// Load the admin and require its signature
    pub fn authorize(env: &Env) -> Result<Address, Error> {
        let admin = Storage::get_admin(env)?;
        admin.require_auth();
        Ok(admin)
    }

    pub fn check_not_paused(env: &Env) -> Result<(), Error> {
        if Storage::is_paused(env) {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }

    /// Create an upcoming offering from validated terms
    pub fn create_offering(env: &Env, terms: &OfferingTerms) -> Result<u32, Error> {
        Self::check_not_paused(env)?;
        Self::authorize(env)?;

        Validator::validate_offering_terms(env, terms)?;

        let offering = Offering {
            id: Storage::next_offering_id(env),
            ticker: terms.ticker.clone(),
            company_name: terms.company_name.clone(),
            exchange: terms.exchange.clone(),
            price_min: terms.price_min,
            price_max: terms.price_max,
            lot_size: terms.lot_size,
            total_shares: terms.total_shares,
            allocated_shares: 0,
            remaining_shares: terms.total_shares,
            start_date: terms.start_date,
            end_date: terms.end_date,
            status: OfferingStatus::Upcoming,
            allocation_completed: false,
            archived: false,
            created_at: env.ledger().timestamp(),
        };

        Storage::set_offering(env, &offering);
        Storage::index_offering(env, OfferingStatus::Upcoming, offering.id);

        env.events().publish(
            (Symbol::new(env, "offering_created"), offering.id),
            OfferingCreatedEvent {
                offering_id: offering.id,
                ticker: offering.ticker.clone(),
                price_min: offering.price_min,
                price_max: offering.price_max,
                lot_size: offering.lot_size,
                total_shares: offering.total_shares,
                start_date: offering.start_date,
                end_date: offering.end_date,
            },
        );

        Ok(offering.id)
    }

    /// Soft-delete an offering. Allowed before it opens or after allocation.
    pub fn archive_offering(env: &Env, offering_id: u32) -> Result<(), Error> {
        Self::check_not_paused(env)?;
        Self::authorize(env)?;

        let mut offering = Storage::get_offering(env, offering_id)?;
        if offering.archived {
            return Err(Error::InvalidStatus);
        }

        // Subscriptions only exist from Active onwards, so Upcoming has none
        let archivable = matches!(
            offering.status,
            OfferingStatus::Upcoming | OfferingStatus::Allocated
        );
        if !archivable {
            return Err(Error::InvalidStatus);
        }

        offering.archived = true;
        Storage::set_offering(env, &offering);
        Storage::unindex_offering(env, offering.status, offering_id);

        env.events().publish(
            (Symbol::new(env, "offering_archived"), offering_id),
            OfferingArchivedEvent { offering_id },
        );

        Ok(())
    }

    pub fn set_tick_limit(env: &Env, limit: u32) -> Result<(), Error> {
        Self::check_not_paused(env)?;
        Self::authorize(env)?;
        if limit == 0 {
            return Err(Error::InvalidAmount);
        }
        Storage::set_max_allocations_per_tick(env, limit);
        Ok(())
    }

    /// Offerings already past the new cap keep their subscriptions
    pub fn set_subscriber_cap(env: &Env, cap: u32) -> Result<(), Error> {
        Self::check_not_paused(env)?;
        Self::authorize(env)?;
        if cap == 0 {
            return Err(Error::InvalidAmount);
        }
        Storage::set_max_subscribers_per_offering(env, cap);
        Ok(())
    }

    pub fn set_paused(env: &Env, paused: bool) -> Result<(), Error> {
        Self::authorize(env)?;
        Storage::set_paused(env, paused);
        Ok(())
    }
}
