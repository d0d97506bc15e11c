use soroban_sdk::{contracttype, Address, String, Symbol};

// Constants
pub const SCALE: i128 = 10_000_000; // 7 decimals
pub const DEFAULT_MAX_ALLOCATIONS_PER_TICK: u32 = 10;
pub const DEFAULT_MAX_SUBSCRIBERS_PER_OFFERING: u32 = 200;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OfferingStatus {
    /// Created, subscription window not yet open
    Upcoming = 0,
    /// Subscription window open
    Active = 1,
    /// Window elapsed, waiting for allocation
    Closed = 2,
    /// Share pool distributed (terminal)
    Allocated = 3,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubscriptionStatus {
    Pending = 0,
    Confirmed = 1,
    Allocated = 2,
    Rejected = 3,
}

impl SubscriptionStatus {
    /// Pending and confirmed subscriptions hold a reservation against the balance
    pub fn is_reserved(&self) -> bool {
        matches!(self, SubscriptionStatus::Pending | SubscriptionStatus::Confirmed)
    }
}

/// Admin-supplied terms for a new offering
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferingTerms {
    pub ticker: Symbol,
    pub company_name: String,
    pub exchange: Symbol,
    pub price_min: i128,
    pub price_max: i128,
    pub lot_size: i128,
    pub total_shares: i128,
    pub start_date: u64,
    pub end_date: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Offering {
    pub id: u32,
    pub ticker: Symbol,
    pub company_name: String,
    pub exchange: Symbol,
    pub price_min: i128,              // Inclusive band, scaled by SCALE
    pub price_max: i128,
    pub lot_size: i128,               // Quantities must be multiples of this
    pub total_shares: i128,
    pub allocated_shares: i128,
    pub remaining_shares: i128,
    pub start_date: u64,
    pub end_date: u64,
    pub status: OfferingStatus,
    pub allocation_completed: bool,   // Guard against a second allocation pass
    pub archived: bool,
    pub created_at: u64,
}

impl Offering {
    /// Active, not archived, and `now` inside [start_date, end_date]
    pub fn is_open(&self, now: u64) -> bool {
        self.status == OfferingStatus::Active
            && !self.archived
            && now >= self.start_date
            && now <= self.end_date
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub id: u64,
    pub user: Address,
    pub offering_id: u32,
    pub quantity: i128,
    pub price_per_share: i128,
    pub total_amount: i128,           // quantity * price_per_share
    pub status: SubscriptionStatus,
    pub allocation_quantity: i128,
    pub allocation_amount: i128,
    pub created_at: u64,
    pub settled_at: u64,              // Zero until allocation
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Balance {
    pub total_balance: i128,
    pub reserved_amount: i128,
    pub available_balance: i128,
}

/// Outcome of a dry-run subscription check. `reason` is zero when accepted,
/// otherwise the numeric code of the rejecting `Error`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionCheck {
    pub reason: u32,
    pub required: i128,
    pub available: i128,
}

/// Result of one allocation pass, also published as the `allocated` event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationSummary {
    pub offering_id: u32,
    pub allocated_shares: i128,
    pub remaining_shares: i128,
    pub filled: u32,
    pub rejected: u32,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TickReport {
    pub promoted: u32,
    pub closed: u32,
    pub allocated: u32,
    pub failed: u32,
    pub deferred: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    pub admin: Address,
    pub funding_desk: Address,
    pub max_allocations_per_tick: u32,
    pub max_subscribers_per_offering: u32,
    pub paused: bool,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    Paused,
    FundingDesk,                      // Deposit + member registry contract
    MaxAllocationsPerTick,
    MaxSubscribersPerOffering,        // Also the per-tick settlement budget
    NextOfferingId,
    NextSubscriptionId,
    Offering(u32),                    // offering_id -> Offering
    PhaseIndex(OfferingStatus),       // status -> Vec<offering_id>
    Subscription(u64),                // subscription_id -> Subscription
    OfferingSubscriptions(u32),       // offering_id -> Vec<subscription_id>
    UserSubscriptions(Address),       // user -> Vec<subscription_id>, full history
    UserReservations(Address),        // user -> Vec<subscription_id>, pruned on subscribe
}
