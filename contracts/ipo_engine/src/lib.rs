#![no_std]

mod admin;
mod allocation;
mod balance;
mod error;
mod events;
mod ledger;
mod lifecycle;
mod storage;
mod types;
mod validation;


use admin::Admin;
use allocation::AllocationEngine;
use balance::LedgerReader;
use ledger::SubscriptionLedger;
use lifecycle::LifecycleManager;
use storage::Storage;

pub use error::Error;
pub use types::{
    AllocationSummary, Balance, EngineConfig, Offering, OfferingStatus, OfferingTerms,
    Subscription, SubscriptionCheck, SubscriptionStatus, TickReport, SCALE,
};

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

#[contract]
pub struct IpoEngine;

#[contractimpl]
impl IpoEngine {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the engine
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidAmount`: Tick allocation limit must be positive
    pub fn initialize(
        env: Env,
        admin: Address,
        funding_desk: Address,
        max_allocations_per_tick: u32,
    ) -> Result<(), Error> {
        Admin::initialize(&env, &admin, &funding_desk, max_allocations_per_tick)
    }

    /// Pause user and admin mutations (ticks keep running)
    pub fn pause(env: Env) -> Result<(), Error> {
        Admin::set_paused(&env, true)
    }

    pub fn unpause(env: Env) -> Result<(), Error> {
        Admin::set_paused(&env, false)
    }

    /// Bound the number of offerings allocated in a single tick
    pub fn set_tick_limit(env: Env, limit: u32) -> Result<(), Error> {
        Admin::set_tick_limit(&env, limit)
    }

    /// Cap subscriptions per offering. Also bounds subscriptions settled per tick.
    pub fn set_subscriber_cap(env: Env, cap: u32) -> Result<(), Error> {
        Admin::set_subscriber_cap(&env, cap)
    }

    /// Create an offering in the upcoming state
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ContractPaused`: Contract is paused
    /// - `InvalidPriceBand`: Need 0 < price_min <= price_max
    /// - `InvalidLotSize`: Lot size must be positive
    /// - `InvalidSharePool`: Pool must be positive whole lots
    /// - `InvalidTimestamp`: Need start < end, end in the future
    pub fn create_offering(env: Env, terms: OfferingTerms) -> Result<u32, Error> {
        Admin::create_offering(&env, &terms)
    }

    /// Soft-delete an offering (upcoming or allocated only)
    pub fn archive_offering(env: Env, offering_id: u32) -> Result<(), Error> {
        Admin::archive_offering(&env, offering_id)
    }

    /// Mark a pending subscription as confirmed (admin only)
    ///
    /// # Errors
    /// - `SubscriptionNotFound`: Unknown subscription
    /// - `InvalidStatus`: Subscription is not pending
    /// - `OfferingNotOpen`: Offering window no longer open
    pub fn confirm_subscription(env: Env, subscription_id: u64) -> Result<Subscription, Error> {
        Admin::check_not_paused(&env)?;
        Admin::authorize(&env)?;
        SubscriptionLedger::confirm(&env, subscription_id)
    }

    /// Allocate a closed offering outside the tick (admin only). Like the
    /// tick, this keeps working while paused.
    ///
    /// # Errors
    /// - `AllocationConflict`: Allocation already completed
    /// - `OfferingNotClosed`: Offering has not closed yet
    pub fn run_allocation(env: Env, offering_id: u32) -> Result<AllocationSummary, Error> {
        Admin::authorize(&env)?;
        AllocationEngine::allocate(&env, offering_id)
    }

    // ============================================
    // SCHEDULER
    // ============================================

    /// Advance offering phases and allocate closed offerings. Callable by anyone.
    pub fn tick(env: Env) -> TickReport {
        LifecycleManager::tick(&env)
    }

    // ============================================
    // USER FUNCTIONS
    // ============================================

    /// Subscribe to an open offering
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `UnknownMember`: User not registered with the funding desk
    /// - `OfferingNotFound`: Offering doesn't exist
    /// - `OfferingNotOpen`: Offering not active or outside its window
    /// - `PriceOutOfBand`: Price outside the offering's band
    /// - `LotSizeMismatch`: Quantity not a positive multiple of lot size
    /// - `DuplicateSubscription`: User already has an open subscription here
    /// - `InsufficientBalance`: quantity x price exceeds available balance
    /// - `OfferingFull`: Offering reached its subscriber cap
    pub fn subscribe(
        env: Env,
        user: Address,
        offering_id: u32,
        quantity: i128,
        price: i128,
    ) -> Result<Subscription, Error> {
        Admin::check_not_paused(&env)?;
        user.require_auth();
        SubscriptionLedger::subscribe(&env, &user, offering_id, quantity, price)
    }

    /// Withdraw a pending subscription while its offering is open
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `SubscriptionNotFound`: Unknown subscription
    /// - `NotCancellable`: Not the owner, not pending, or offering no longer open
    pub fn cancel_subscription(env: Env, user: Address, subscription_id: u64) -> Result<(), Error> {
        Admin::check_not_paused(&env)?;
        user.require_auth();
        SubscriptionLedger::cancel(&env, &user, subscription_id)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_balance(env: Env, user: Address) -> Result<Balance, Error> {
        LedgerReader::get_balance(&env, &user)
    }

    /// Dry-run the subscription checks without recording anything
    pub fn check_subscription(
        env: Env,
        user: Address,
        offering_id: u32,
        quantity: i128,
        price: i128,
    ) -> Result<SubscriptionCheck, Error> {
        let offering = Storage::get_offering(&env, offering_id)?;
        let balance = LedgerReader::get_balance(&env, &user)?;
        let required = quantity.checked_mul(price).unwrap_or(i128::MAX);

        let verdict = Admin::check_not_paused(&env)
            .and_then(|_| SubscriptionLedger::precheck(&env, &user, &offering, quantity, price));
        let reason = match verdict {
            Ok(_) => 0,
            Err(err) => err as u32,
        };

        Ok(SubscriptionCheck {
            reason,
            required,
            available: balance.available_balance,
        })
    }

    pub fn get_offering(env: Env, offering_id: u32) -> Result<Offering, Error> {
        Storage::get_offering(&env, offering_id)
    }

    /// Non-archived offerings in the given phase, oldest first
    pub fn list_offerings(env: Env, status: OfferingStatus) -> Vec<Offering> {
        let mut offerings = Vec::new(&env);
        for id in Storage::phase_index(&env, status).iter() {
            if let Ok(offering) = Storage::get_offering(&env, id) {
                offerings.push_back(offering);
            }
        }
        offerings
    }

    pub fn list_active_offerings(env: Env) -> Vec<Offering> {
        Self::list_offerings(env, OfferingStatus::Active)
    }

    pub fn list_upcoming_offerings(env: Env) -> Vec<Offering> {
        Self::list_offerings(env, OfferingStatus::Upcoming)
    }

    pub fn get_subscription(env: Env, subscription_id: u64) -> Result<Subscription, Error> {
        Storage::get_subscription(&env, subscription_id)
    }

    pub fn list_user_subscriptions(env: Env, user: Address) -> Result<Vec<Subscription>, Error> {
        SubscriptionLedger::list_for_user(&env, &user)
    }

    pub fn list_offering_subscriptions(
        env: Env,
        offering_id: u32,
        status_filter: Option<SubscriptionStatus>,
    ) -> Result<Vec<Subscription>, Error> {
        SubscriptionLedger::list_for_offering(&env, offering_id, status_filter)
    }

    pub fn get_config(env: Env) -> Result<EngineConfig, Error> {
        Ok(EngineConfig {
            admin: Storage::get_admin(&env)?,
            funding_desk: Storage::get_funding_desk(&env)?,
            max_allocations_per_tick: Storage::get_max_allocations_per_tick(&env),
            max_subscribers_per_offering: Storage::get_max_subscribers_per_offering(&env),
            paused: Storage::is_paused(&env),
        })
    }
}
