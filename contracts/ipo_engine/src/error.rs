use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// User is not registered with the funding desk
    UnknownMember = 11,

    // ============================================
    // OFFERING MANAGEMENT ERRORS (20-29)
    // ============================================
    /// Offering not found
    OfferingNotFound = 20,
    /// Price band must satisfy 0 < price_min <= price_max
    InvalidPriceBand = 21,
    /// Lot size must be positive
    InvalidLotSize = 22,
    /// Share pool must be positive and a multiple of the lot size
    InvalidSharePool = 23,
    /// Window must satisfy start < end and end in the future
    InvalidTimestamp = 24,
    /// Offering status does not allow this operation
    InvalidStatus = 25,

    // ============================================
    // SUBSCRIPTION ERRORS (30-39)
    // ============================================
    /// Offering is not accepting subscriptions
    OfferingNotOpen = 30,
    /// Price outside [price_min, price_max]
    PriceOutOfBand = 31,
    /// Quantity not a positive multiple of lot size
    LotSizeMismatch = 32,
    /// User already holds an open subscription for this offering
    DuplicateSubscription = 33,
    /// Quantity x price exceeds available balance
    InsufficientBalance = 34,
    /// Subscription not found
    SubscriptionNotFound = 35,
    /// Subscription is not owned, not pending, or offering no longer open
    NotCancellable = 36,
    /// Offering already holds the maximum number of subscriptions
    OfferingFull = 37,

    // ============================================
    // AMOUNT ERRORS (40-49)
    // ============================================
    /// Amount overflow or non-positive amount
    InvalidAmount = 40,

    // ============================================
    // ALLOCATION ERRORS (50-59)
    // ============================================
    /// Allocation already completed for this offering
    AllocationConflict = 50,
    /// Offering has not closed yet
    OfferingNotClosed = 51,

    // ============================================
    // OPERATIONAL ERRORS (60-69)
    // ============================================
    /// Contract is paused
    ContractPaused = 60,
}
