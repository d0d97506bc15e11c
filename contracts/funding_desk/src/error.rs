use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Membership errors
    NotMember = 10,

    // Deposit errors
    DepositNotFound = 20,
    InvalidStatus = 21,
    InvalidAmount = 30,
}
