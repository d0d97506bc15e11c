use crate::types::OfferingStatus;
use soroban_sdk::{contracttype, Address, Symbol};

#[contracttype]
#[derive(Clone, Debug)]
pub struct OfferingCreatedEvent {
    pub offering_id: u32,
    pub ticker: Symbol,
    pub price_min: i128,
    pub price_max: i128,
    pub lot_size: i128,
    pub total_shares: i128,
    pub start_date: u64,
    pub end_date: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct OfferingArchivedEvent {
    pub offering_id: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PhaseChangedEvent {
    pub offering_id: u32,
    pub from: OfferingStatus,
    pub to: OfferingStatus,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscribedEvent {
    pub subscription_id: u64,
    pub offering_id: u32,
    pub user: Address,
    pub quantity: i128,
    pub price_per_share: i128,
    pub total_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriptionCancelledEvent {
    pub subscription_id: u64,
    pub offering_id: u32,
    pub user: Address,
    pub released_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriptionConfirmedEvent {
    pub subscription_id: u64,
    pub offering_id: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct AllocationFailedEvent {
    pub offering_id: u32,
    pub code: u32,
}
