use crate::error::Error;
use crate::types::{
    DataKey, Offering, OfferingStatus, Subscription, DEFAULT_MAX_ALLOCATIONS_PER_TICK,
    DEFAULT_MAX_SUBSCRIBERS_PER_OFFERING,
};
use soroban_sdk::{Address, Env, Vec};

pub struct Storage;

impl Storage {
    // Admin & config
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn get_admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_funding_desk(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::FundingDesk)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_max_allocations_per_tick(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::MaxAllocationsPerTick)
            .unwrap_or(DEFAULT_MAX_ALLOCATIONS_PER_TICK)
    }

    pub fn set_max_allocations_per_tick(env: &Env, limit: u32) {
        env.storage()
            .instance()
            .set(&DataKey::MaxAllocationsPerTick, &limit);
    }

    pub fn get_max_subscribers_per_offering(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::MaxSubscribersPerOffering)
            .unwrap_or(DEFAULT_MAX_SUBSCRIBERS_PER_OFFERING)
    }

    pub fn set_max_subscribers_per_offering(env: &Env, cap: u32) {
        env.storage()
            .instance()
            .set(&DataKey::MaxSubscribersPerOffering, &cap);
    }

    pub fn is_paused(env: &Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Paused)
            .unwrap_or(false)
    }

    pub fn set_paused(env: &Env, paused: bool) {
        env.storage().instance().set(&DataKey::Paused, &paused);
    }

    // ID counters
    pub fn next_offering_id(env: &Env) -> u32 {
        let next: u32 = env
            .storage()
            .instance()
            .get(&DataKey::NextOfferingId)
            .unwrap_or(1);
        env.storage()
            .instance()
            .set(&DataKey::NextOfferingId, &(next + 1));
        next
    }

    pub fn next_subscription_id(env: &Env) -> u64 {
        let next: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextSubscriptionId)
            .unwrap_or(1);
        env.storage()
            .instance()
            .set(&DataKey::NextSubscriptionId, &(next + 1));
        next
    }

    // Offerings
    pub fn get_offering(env: &Env, offering_id: u32) -> Result<Offering, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Offering(offering_id))
            .ok_or(Error::OfferingNotFound)
    }

    pub fn set_offering(env: &Env, offering: &Offering) {
        env.storage()
            .persistent()
            .set(&DataKey::Offering(offering.id), offering);
    }

    // Phase indices: offering ids grouped by status, in insertion order
    pub fn phase_index(env: &Env, status: OfferingStatus) -> Vec<u32> {
        env.storage()
            .persistent()
            .get(&DataKey::PhaseIndex(status))
            .unwrap_or(Vec::new(env))
    }

    fn set_phase_index(env: &Env, status: OfferingStatus, ids: &Vec<u32>) {
        env.storage()
            .persistent()
            .set(&DataKey::PhaseIndex(status), ids);
    }

    pub fn index_offering(env: &Env, status: OfferingStatus, offering_id: u32) {
        let mut ids = Self::phase_index(env, status);
        ids.push_back(offering_id);
        Self::set_phase_index(env, status, &ids);
    }

    pub fn unindex_offering(env: &Env, status: OfferingStatus, offering_id: u32) {
        let mut ids = Self::phase_index(env, status);
        if let Some(pos) = ids.first_index_of(offering_id) {
            ids.remove(pos);
            Self::set_phase_index(env, status, &ids);
        }
    }

    /// Move an offering between phase indices and persist its new status
    pub fn move_offering(env: &Env, offering: &mut Offering, to: OfferingStatus) {
        Self::unindex_offering(env, offering.status, offering.id);
        offering.status = to;
        Self::set_offering(env, offering);
        Self::index_offering(env, to, offering.id);
    }

    // Subscriptions
    pub fn get_subscription(env: &Env, subscription_id: u64) -> Result<Subscription, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Subscription(subscription_id))
            .ok_or(Error::SubscriptionNotFound)
    }

    pub fn set_subscription(env: &Env, subscription: &Subscription) {
        env.storage()
            .persistent()
            .set(&DataKey::Subscription(subscription.id), subscription);
    }

    pub fn offering_subscription_ids(env: &Env, offering_id: u32) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::OfferingSubscriptions(offering_id))
            .unwrap_or(Vec::new(env))
    }

    pub fn user_subscription_ids(env: &Env, user: &Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::UserSubscriptions(user.clone()))
            .unwrap_or(Vec::new(env))
    }

    /// Ids that may still hold a reservation. Settled ids linger until the
    /// user's next subscribe prunes them.
    pub fn reservation_ids(env: &Env, user: &Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::UserReservations(user.clone()))
            .unwrap_or(Vec::new(env))
    }

    fn set_reservation_ids(env: &Env, user: &Address, ids: &Vec<u64>) {
        env.storage()
            .persistent()
            .set(&DataKey::UserReservations(user.clone()), ids);
    }

    /// Persist a new subscription and register it in every index
    pub fn insert_subscription(env: &Env, subscription: &Subscription) {
        Self::set_subscription(env, subscription);

        let offering_key = DataKey::OfferingSubscriptions(subscription.offering_id);
        let mut by_offering = Self::offering_subscription_ids(env, subscription.offering_id);
        by_offering.push_back(subscription.id);
        env.storage().persistent().set(&offering_key, &by_offering);

        let user_key = DataKey::UserSubscriptions(subscription.user.clone());
        let mut by_user = Self::user_subscription_ids(env, &subscription.user);
        by_user.push_back(subscription.id);
        env.storage().persistent().set(&user_key, &by_user);

        let mut live = Vec::new(env);
        for id in Self::reservation_ids(env, &subscription.user).iter() {
            if let Ok(existing) = Self::get_subscription(env, id) {
                if existing.status.is_reserved() {
                    live.push_back(id);
                }
            }
        }
        live.push_back(subscription.id);
        Self::set_reservation_ids(env, &subscription.user, &live);
    }

    /// Delete a subscription record and drop it from every index
    pub fn delete_subscription(env: &Env, subscription: &Subscription) {
        env.storage()
            .persistent()
            .remove(&DataKey::Subscription(subscription.id));

        let mut by_offering = Self::offering_subscription_ids(env, subscription.offering_id);
        if let Some(pos) = by_offering.first_index_of(subscription.id) {
            by_offering.remove(pos);
            env.storage().persistent().set(
                &DataKey::OfferingSubscriptions(subscription.offering_id),
                &by_offering,
            );
        }

        let mut by_user = Self::user_subscription_ids(env, &subscription.user);
        if let Some(pos) = by_user.first_index_of(subscription.id) {
            by_user.remove(pos);
            env.storage().persistent().set(
                &DataKey::UserSubscriptions(subscription.user.clone()),
                &by_user,
            );
        }

        let mut live = Self::reservation_ids(env, &subscription.user);
        if let Some(pos) = live.first_index_of(subscription.id) {
            live.remove(pos);
            Self::set_reservation_ids(env, &subscription.user, &live);
        }
    }
}
