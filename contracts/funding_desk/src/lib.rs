#![no_std]

mod error;
mod events;
mod storage;

use error::Error;
use events::{DepositRequestedEvent, DepositReviewedEvent, MemberEvent};
use storage::{DataKey, Deposit, DepositStatus};

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol, Vec};

#[contract]
pub struct FundingDesk;

#[contractimpl]
impl FundingDesk {
    /// Initialize the desk
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::DepositCounter, &0u64);

        Ok(())
    }

    // ============================================
    // MEMBERS
    // ============================================

    /// Register a verified member (admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn register_member(env: Env, user: Address) -> Result<(), Error> {
        Self::admin(&env)?.require_auth();

        env.storage()
            .persistent()
            .set(&DataKey::Member(user.clone()), &true);

        env.events().publish(
            (Symbol::new(&env, "member"), user.clone()),
            MemberEvent {
                user,
                registered: true,
            },
        );

        Ok(())
    }

    /// Remove a member (admin only). Existing deposits are kept.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn remove_member(env: Env, user: Address) -> Result<(), Error> {
        Self::admin(&env)?.require_auth();

        env.storage()
            .persistent()
            .remove(&DataKey::Member(user.clone()));

        env.events().publish(
            (Symbol::new(&env, "member"), user.clone()),
            MemberEvent {
                user,
                registered: false,
            },
        );

        Ok(())
    }

    pub fn is_member(env: Env, user: Address) -> bool {
        env.storage()
            .persistent()
            .get::<DataKey, bool>(&DataKey::Member(user))
            .unwrap_or(false)
    }

    // ============================================
    // DEPOSITS
    // ============================================

    /// Submit a deposit for review
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `NotMember`: User is not a registered member
    pub fn request_deposit(env: Env, user: Address, amount: i128) -> Result<u64, Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        user.require_auth();

        if !Self::is_member(env.clone(), user.clone()) {
            return Err(Error::NotMember);
        }

        let counter: u64 = env
            .storage()
            .instance()
            .get(&DataKey::DepositCounter)
            .unwrap_or(0);
        let deposit_id = counter + 1;

        let deposit = Deposit {
            id: deposit_id,
            user: user.clone(),
            amount,
            status: DepositStatus::Pending,
            requested_at: env.ledger().timestamp(),
            reviewed_at: 0,
        };

        env.storage()
            .persistent()
            .set(&DataKey::Deposit(deposit_id), &deposit);
        env.storage()
            .instance()
            .set(&DataKey::DepositCounter, &deposit_id);

        let index_key = DataKey::UserDeposits(user.clone());
        let mut ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&index_key)
            .unwrap_or(Vec::new(&env));
        ids.push_back(deposit_id);
        env.storage().persistent().set(&index_key, &ids);

        env.events().publish(
            (Symbol::new(&env, "deposit_requested"), deposit_id),
            DepositRequestedEvent {
                deposit_id,
                user,
                amount,
            },
        );

        Ok(deposit_id)
    }

    /// Approve a pending deposit (admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `DepositNotFound`: Unknown deposit id
    /// - `InvalidStatus`: Deposit already reviewed
    pub fn approve_deposit(env: Env, deposit_id: u64) -> Result<(), Error> {
        Self::review(&env, deposit_id, DepositStatus::Approved)
    }

    /// Reject a pending deposit (admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `DepositNotFound`: Unknown deposit id
    /// - `InvalidStatus`: Deposit already reviewed
    pub fn reject_deposit(env: Env, deposit_id: u64) -> Result<(), Error> {
        Self::review(&env, deposit_id, DepositStatus::Rejected)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_deposit(env: Env, deposit_id: u64) -> Result<Deposit, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Deposit(deposit_id))
            .ok_or(Error::DepositNotFound)
    }

    /// All deposits of a user, oldest first
    pub fn list_deposits(env: Env, user: Address) -> Vec<Deposit> {
        let mut deposits = Vec::new(&env);
        for id in Self::deposit_ids(&env, &user).iter() {
            if let Some(deposit) = env
                .storage()
                .persistent()
                .get::<DataKey, Deposit>(&DataKey::Deposit(id))
            {
                deposits.push_back(deposit);
            }
        }
        deposits
    }

    /// Amounts of the user's approved deposits
    pub fn approved_amounts(env: Env, user: Address) -> Vec<i128> {
        let mut amounts = Vec::new(&env);
        for deposit in Self::list_deposits(env.clone(), user).iter() {
            if deposit.status == DepositStatus::Approved {
                amounts.push_back(deposit.amount);
            }
        }
        amounts
    }

    pub fn approved_total(env: Env, user: Address) -> Result<i128, Error> {
        let mut total: i128 = 0;
        for amount in Self::approved_amounts(env, user).iter() {
            total = total.checked_add(amount).ok_or(Error::InvalidAmount)?;
        }
        Ok(total)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    fn deposit_ids(env: &Env, user: &Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::UserDeposits(user.clone()))
            .unwrap_or(Vec::new(env))
    }

    fn review(env: &Env, deposit_id: u64, outcome: DepositStatus) -> Result<(), Error> {
        Self::admin(env)?.require_auth();

        let mut deposit: Deposit = env
            .storage()
            .persistent()
            .get(&DataKey::Deposit(deposit_id))
            .ok_or(Error::DepositNotFound)?;

        if deposit.status != DepositStatus::Pending {
            return Err(Error::InvalidStatus);
        }

        deposit.status = outcome;
        deposit.reviewed_at = env.ledger().timestamp();
        env.storage()
            .persistent()
            .set(&DataKey::Deposit(deposit_id), &deposit);

        env.events().publish(
            (Symbol::new(env, "deposit_reviewed"), deposit_id),
            DepositReviewedEvent {
                deposit_id,
                user: deposit.user,
                amount: deposit.amount,
                approved: outcome == DepositStatus::Approved,
            },
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Address, Env};

    const SCALE: i128 = 10_000_000;

    fn setup(env: &Env) -> (FundingDeskClient<'_>, Address) {
        env.mock_all_auths();
        let contract_id = env.register(FundingDesk, ());
        let client = FundingDeskClient::new(env, &contract_id);

        let admin = Address::generate(env);
        client.initialize(&admin);
        (client, admin)
    }

    #[test]
    fn test_initialize_twice() {
        let env = Env::default();
        let (client, admin) = setup(&env);

        let result = client.try_initialize(&admin);
        assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
    }

    #[test]
    fn test_membership() {
        let env = Env::default();
        let (client, _) = setup(&env);
        let user = Address::generate(&env);

        assert!(!client.is_member(&user));
        client.register_member(&user);
        assert!(client.is_member(&user));
        client.remove_member(&user);
        assert!(!client.is_member(&user));
    }

    #[test]
    fn test_only_members_can_deposit() {
        let env = Env::default();
        let (client, _) = setup(&env);
        let user = Address::generate(&env);

        let result = client.try_request_deposit(&user, &(100 * SCALE));
        assert_eq!(result, Err(Ok(Error::NotMember)));
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let env = Env::default();
        let (client, _) = setup(&env);
        let user = Address::generate(&env);
        client.register_member(&user);

        assert_eq!(
            client.try_request_deposit(&user, &0),
            Err(Ok(Error::InvalidAmount))
        );
        assert_eq!(
            client.try_request_deposit(&user, &(-5 * SCALE)),
            Err(Ok(Error::InvalidAmount))
        );
    }

    #[test]
    fn test_only_approved_deposits_count() {
        let env = Env::default();
        let (client, _) = setup(&env);
        let user = Address::generate(&env);
        client.register_member(&user);

        let first = client.request_deposit(&user, &(600 * SCALE));
        let second = client.request_deposit(&user, &(400 * SCALE));
        let third = client.request_deposit(&user, &(250 * SCALE));

        client.approve_deposit(&first);
        client.approve_deposit(&second);
        client.reject_deposit(&third);

        let amounts = client.approved_amounts(&user);
        assert_eq!(amounts.len(), 2);
        assert_eq!(client.approved_total(&user), 1_000 * SCALE);

        let deposits = client.list_deposits(&user);
        assert_eq!(deposits.len(), 3);
        assert_eq!(deposits.get(2).unwrap().status, DepositStatus::Rejected);
    }

    #[test]
    fn test_review_only_once() {
        let env = Env::default();
        let (client, _) = setup(&env);
        let user = Address::generate(&env);
        client.register_member(&user);

        let id = client.request_deposit(&user, &(100 * SCALE));
        client.approve_deposit(&id);

        assert_eq!(client.try_approve_deposit(&id), Err(Ok(Error::InvalidStatus)));
        assert_eq!(client.try_reject_deposit(&id), Err(Ok(Error::InvalidStatus)));
        assert_eq!(
            client.try_approve_deposit(&99),
            Err(Ok(Error::DepositNotFound))
        );
    }

    #[test]
    fn test_pending_deposit_not_counted() {
        let env = Env::default();
        let (client, _) = setup(&env);
        let user = Address::generate(&env);
        client.register_member(&user);

        let id = client.request_deposit(&user, &(100 * SCALE));
        assert_eq!(client.approved_total(&user), 0);
        assert_eq!(client.get_deposit(&id).status, DepositStatus::Pending);
    }
}
