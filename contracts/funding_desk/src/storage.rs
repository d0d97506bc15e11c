use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DepositStatus {
    /// Submitted by the member, awaiting review
    Pending = 0,
    /// Reviewed and counted toward the member's balance
    Approved = 1,
    /// Reviewed and discarded
    Rejected = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub id: u64,
    pub user: Address,
    pub amount: i128,
    pub status: DepositStatus,
    pub requested_at: u64,
    /// Zero until reviewed
    pub reviewed_at: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    DepositCounter,
    Member(Address),
    Deposit(u64),
    UserDeposits(Address), // user -> Vec<deposit_id>
}
