use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberEvent {
    pub user: Address,
    pub registered: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositRequestedEvent {
    pub deposit_id: u64,
    pub user: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositReviewedEvent {
    pub deposit_id: u64,
    pub user: Address,
    pub amount: i128,
    pub approved: bool,
}
