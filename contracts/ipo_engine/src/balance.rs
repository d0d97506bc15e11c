use crate::error::Error;
use crate::storage::Storage;
use crate::types::Balance;
use soroban_sdk::{vec, Address, Env, IntoVal, Symbol, Vec};

/// Derives balances from the funding desk's approved deposits and the
/// user's open subscriptions. Nothing here is cached or written.
pub struct LedgerReader;

impl LedgerReader {
    pub fn get_balance(env: &Env, user: &Address) -> Result<Balance, Error> {
        let total_balance = Self::approved_total(env, user)?;
        let reserved_amount = Self::reserved_amount(env, user)?;
        let available_balance = total_balance
            .checked_sub(reserved_amount)
            .ok_or(Error::InvalidAmount)?;

        Ok(Balance {
            total_balance,
            reserved_amount,
            available_balance,
        })
    }

    /// Sum of the user's approved deposits
    pub fn approved_total(env: &Env, user: &Address) -> Result<i128, Error> {
        let desk = Storage::get_funding_desk(env)?;
        let amounts: Vec<i128> = env.invoke_contract(
            &desk,
            &Symbol::new(env, "approved_amounts"),
            vec![env, user.into_val(env)],
        );

        let mut total: i128 = 0;
        for amount in amounts.iter() {
            total = total.checked_add(amount).ok_or(Error::InvalidAmount)?;
        }
        Ok(total)
    }

    /// Sum of total_amount over the user's pending and confirmed subscriptions
    pub fn reserved_amount(env: &Env, user: &Address) -> Result<i128, Error> {
        let mut reserved: i128 = 0;
        for id in Storage::reservation_ids(env, user).iter() {
            let subscription = Storage::get_subscription(env, id)?;
            if subscription.status.is_reserved() {
                reserved = reserved
                    .checked_add(subscription.total_amount)
                    .ok_or(Error::InvalidAmount)?;
            }
        }
        Ok(reserved)
    }

    /// The user's reserved subscription for `offering_id`, if any
    pub fn open_subscription(
        env: &Env,
        user: &Address,
        offering_id: u32,
    ) -> Result<Option<u64>, Error> {
        for id in Storage::reservation_ids(env, user).iter() {
            let subscription = Storage::get_subscription(env, id)?;
            if subscription.offering_id == offering_id && subscription.status.is_reserved() {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// User service check against the funding desk's member registry
    pub fn is_member(env: &Env, user: &Address) -> Result<bool, Error> {
        let desk = Storage::get_funding_desk(env)?;
        Ok(env.invoke_contract(
            &desk,
            &Symbol::new(env, "is_member"),
            vec![env, user.into_val(env)],
        ))
    }
}
