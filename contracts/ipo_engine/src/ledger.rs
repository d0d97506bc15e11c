use crate::balance::LedgerReader;
use crate::error::Error;
use crate::events::{SubscribedEvent, SubscriptionCancelledEvent, SubscriptionConfirmedEvent};
use crate::storage::Storage;
use crate::types::{Offering, Subscription, SubscriptionStatus};
use crate::validation::Validator;
use soroban_sdk::{Address, Env, Symbol, Vec};

pub struct SubscriptionLedger;

impl SubscriptionLedger {
    /// Validate and record a pending subscription.
    ///
    /// Validation and insert run inside one invocation, so two requests from
    /// the same user cannot both spend the same available balance.
    pub fn subscribe(
        env: &Env,
        user: &Address,
        offering_id: u32,
        quantity: i128,
        price: i128,
    ) -> Result<Subscription, Error> {
        let offering = Storage::get_offering(env, offering_id)?;
        let total_amount = Self::precheck(env, user, &offering, quantity, price)?;

        let subscription = Subscription {
            id: Storage::next_subscription_id(env),
            user: user.clone(),
            offering_id,
            quantity,
            price_per_share: price,
            total_amount,
            status: SubscriptionStatus::Pending,
            allocation_quantity: 0,
            allocation_amount: 0,
            created_at: env.ledger().timestamp(),
            settled_at: 0,
        };
        Storage::insert_subscription(env, &subscription);

        env.events().publish(
            (Symbol::new(env, "subscribed"), offering_id, user.clone()),
            SubscribedEvent {
                subscription_id: subscription.id,
                offering_id,
                user: user.clone(),
                quantity,
                price_per_share: price,
                total_amount,
            },
        );

        Ok(subscription)
    }

    /// Membership plus the validator checks, without writing anything.
    /// Returns the amount the subscription would reserve.
    pub fn precheck(
        env: &Env,
        user: &Address,
        offering: &Offering,
        quantity: i128,
        price: i128,
    ) -> Result<i128, Error> {
        if !LedgerReader::is_member(env, user)? {
            return Err(Error::UnknownMember);
        }
        Validator::validate_subscription(env, offering, user, quantity, price)
    }

    /// Delete a pending subscription owned by `user` while its offering is open
    pub fn cancel(env: &Env, user: &Address, subscription_id: u64) -> Result<(), Error> {
        let subscription = Storage::get_subscription(env, subscription_id)?;

        if subscription.user != *user || subscription.status != SubscriptionStatus::Pending {
            return Err(Error::NotCancellable);
        }

        let offering = Storage::get_offering(env, subscription.offering_id)?;
        if !offering.is_open(env.ledger().timestamp()) {
            return Err(Error::NotCancellable);
        }

        Storage::delete_subscription(env, &subscription);

        env.events().publish(
            (
                Symbol::new(env, "sub_cancelled"),
                subscription.offering_id,
                user.clone(),
            ),
            SubscriptionCancelledEvent {
                subscription_id,
                offering_id: subscription.offering_id,
                user: user.clone(),
                released_amount: subscription.total_amount,
            },
        );

        Ok(())
    }

    /// Pending -> Confirmed while the offering is still open
    pub fn confirm(env: &Env, subscription_id: u64) -> Result<Subscription, Error> {
        let mut subscription = Storage::get_subscription(env, subscription_id)?;
        if subscription.status != SubscriptionStatus::Pending {
            return Err(Error::InvalidStatus);
        }

        let offering = Storage::get_offering(env, subscription.offering_id)?;
        if !offering.is_open(env.ledger().timestamp()) {
            return Err(Error::OfferingNotOpen);
        }

        subscription.status = SubscriptionStatus::Confirmed;
        Storage::set_subscription(env, &subscription);

        env.events().publish(
            (Symbol::new(env, "sub_confirmed"), subscription.offering_id),
            SubscriptionConfirmedEvent {
                subscription_id,
                offering_id: subscription.offering_id,
            },
        );

        Ok(subscription)
    }

    /// Ids are issued in ledger-time order, so index order is creation order
    pub fn list_for_user(env: &Env, user: &Address) -> Result<Vec<Subscription>, Error> {
        let mut listed = Vec::new(env);
        for id in Storage::user_subscription_ids(env, user).iter() {
            listed.push_back(Storage::get_subscription(env, id)?);
        }
        Ok(listed)
    }

    pub fn list_for_offering(
        env: &Env,
        offering_id: u32,
        status_filter: Option<SubscriptionStatus>,
    ) -> Result<Vec<Subscription>, Error> {
        let mut listed = Vec::new(env);
        for id in Storage::offering_subscription_ids(env, offering_id).iter() {
            let subscription = Storage::get_subscription(env, id)?;
            let keep = match status_filter {
                Some(status) => subscription.status == status,
                None => true,
            };
            if keep {
                listed.push_back(subscription);
            }
        }
        Ok(listed)
    }
}
