use crate::balance::LedgerReader;
use crate::error::Error;
use crate::storage::Storage;
use crate::types::{Offering, OfferingTerms};
use soroban_sdk::{log, Address, Env};

pub struct Validator;

impl Validator {
    pub fn validate_offering_terms(env: &Env, terms: &OfferingTerms) -> Result<(), Error> {
        if terms.price_min <= 0 || terms.price_min > terms.price_max {
            return Err(Error::InvalidPriceBand);
        }

        if terms.lot_size <= 0 {
            return Err(Error::InvalidLotSize);
        }

        if terms.total_shares <= 0 || terms.total_shares % terms.lot_size != 0 {
            return Err(Error::InvalidSharePool);
        }

        if terms.start_date >= terms.end_date || terms.end_date <= env.ledger().timestamp() {
            return Err(Error::InvalidTimestamp);
        }

        Ok(())
    }

    /// Run the subscription checks in order, returning the amount to reserve.
    ///
    /// Read-only. The caller commits in the same invocation, so the balance
    /// observed here is the balance the insert is made against.
    pub fn validate_subscription(
        env: &Env,
        offering: &Offering,
        user: &Address,
        quantity: i128,
        price: i128,
    ) -> Result<i128, Error> {
        // 1. Phase
        if !offering.is_open(env.ledger().timestamp()) {
            return Err(Error::OfferingNotOpen);
        }

        // 2. Price band
        if price < offering.price_min || price > offering.price_max {
            return Err(Error::PriceOutOfBand);
        }

        // 3. Lot size
        if quantity <= 0 || quantity % offering.lot_size != 0 {
            return Err(Error::LotSizeMismatch);
        }

        // 4. One open subscription per (user, offering)
        if LedgerReader::open_subscription(env, user, offering.id)?.is_some() {
            return Err(Error::DuplicateSubscription);
        }

        // 5. Balance
        let required = quantity.checked_mul(price).ok_or(Error::InvalidAmount)?;
        let balance = LedgerReader::get_balance(env, user)?;
        if required > balance.available_balance {
            log!(
                env,
                "insufficient balance: available, required",
                balance.available_balance,
                required
            );
            return Err(Error::InsufficientBalance);
        }

        // 6. Subscriber cap bounds the work of one allocation pass
        let queued = Storage::offering_subscription_ids(env, offering.id).len();
        if queued >= Storage::get_max_subscribers_per_offering(env) {
            return Err(Error::OfferingFull);
        }

        Ok(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SCALE;
    use soroban_sdk::{symbol_short, testutils::Ledger, String};

    fn terms(env: &Env) -> OfferingTerms {
        OfferingTerms {
            ticker: symbol_short!("ACME"),
            company_name: String::from_str(env, "Acme Corp"),
            exchange: symbol_short!("NSE"),
            price_min: 90 * SCALE,
            price_max: 100 * SCALE,
            lot_size: 10,
            total_shares: 1_000,
            start_date: 1_000,
            end_date: 2_000,
        }
    }

    #[test]
    fn test_valid_terms() {
        let env = Env::default();
        env.ledger().set_timestamp(500);
        assert_eq!(Validator::validate_offering_terms(&env, &terms(&env)), Ok(()));
    }

    #[test]
    fn test_inverted_price_band() {
        let env = Env::default();
        let mut t = terms(&env);
        t.price_min = 101 * SCALE;
        assert_eq!(
            Validator::validate_offering_terms(&env, &t),
            Err(Error::InvalidPriceBand)
        );

        t.price_min = 0;
        assert_eq!(
            Validator::validate_offering_terms(&env, &t),
            Err(Error::InvalidPriceBand)
        );
    }

    #[test]
    fn test_share_pool_must_be_whole_lots() {
        let env = Env::default();
        let mut t = terms(&env);
        t.total_shares = 1_005;
        assert_eq!(
            Validator::validate_offering_terms(&env, &t),
            Err(Error::InvalidSharePool)
        );

        t.lot_size = 0;
        assert_eq!(
            Validator::validate_offering_terms(&env, &t),
            Err(Error::InvalidLotSize)
        );
    }

    #[test]
    fn test_window_in_the_past() {
        let env = Env::default();
        env.ledger().set_timestamp(2_500);
        assert_eq!(
            Validator::validate_offering_terms(&env, &terms(&env)),
            Err(Error::InvalidTimestamp)
        );

        env.ledger().set_timestamp(0);
        let mut t = terms(&env);
        t.end_date = t.start_date;
        assert_eq!(
            Validator::validate_offering_terms(&env, &t),
            Err(Error::InvalidTimestamp)
        );
    }
}
