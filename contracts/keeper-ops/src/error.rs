use soroban_sdk::contracterror;

/// Errors returned by the keeper contract.
///
/// Every error aborts the invocation and rolls back its effects. Resolvers
/// never use these for "not ready" conditions; those are reported through
/// [`crate::types::CheckerResult::NotReady`].
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum KeeperError {
    /// `initialize` was called on a configured contract
    AlreadyInitialized = 1,
    /// A required configuration entry is missing
    NotInitialized = 2,
    /// Caller does not hold a role allowed to perform the action ("!authorized")
    Unauthorized = 3,
    /// Caller is not governance ("!governance")
    NotGovernance = 4,
    /// Requested execution fee is above the configured ceiling
    FeeExceeded = 5,
    /// Negative fee or fee ceiling
    InvalidFee = 6,
    /// No active job matches the execution request
    TaskNotFound = 7,
    /// The strategy's keeper no longer points at this contract
    StaleBinding = 8,
    /// A job of this type already exists for the entity
    DuplicateJob = 9,
    /// No job of this type exists for the entity
    JobNotFound = 10,
    /// The strategy still uses this contract as its keeper
    KeeperStillBound = 11,
    /// The entry point does not match the configured executor protocol
    IncompatibleProtocol = 12,
    /// Treasury-funded execution was requested
    TreasuryNotSupported = 13,
    /// The job type and entity do not form a valid job
    InvalidJob = 14,
    /// The job action failed and the executor asked to revert on failure
    ActionFailed = 15,
}
