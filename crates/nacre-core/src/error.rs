// crates/nacre-core/src/error.rs

use thiserror::Error;

use crate::address::Address;
use crate::time::Timestamp;

/// Protocol-wide error types for the NACRE Token & Staking Core.
///
/// Every rejected precondition surfaces a distinct kind so callers and tests
/// can assert on cause. Operations fail atomically: an error means no state
/// was mutated.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Caller is not the owner of an owner-gated operation.
    #[error("Unauthorized: caller {caller} is not the owner")]
    Unauthorized { caller: Address },

    /// The system is paused; balance-mutating operations are blocked.
    #[error("System is paused")]
    SystemPaused,

    /// Zero amount or null recipient on a mint.
    #[error("Invalid amount")]
    InvalidAmount,

    /// Transfer recipient is the null address or the stake reserve.
    #[error("Invalid recipient: {recipient}")]
    InvalidRecipient { recipient: Address },

    /// Sender balance does not cover the requested amount.
    #[error("Insufficient balance: requested {requested} pearl but only {available} pearl available")]
    InsufficientBalance { requested: u128, available: u128 },

    /// The staking pool is not accepting new stakes.
    #[error("Staking is not active")]
    StakingInactive,

    /// Stake amount is outside the allowed [min, max] bounds.
    #[error("Stake amount {amount} pearl is outside the allowed range [{min}, {max}]")]
    AmountOutOfRange { amount: u128, min: u128, max: u128 },

    /// Account already has an active stake record.
    #[error("Account {account} already has an active stake")]
    AlreadyStaked { account: Address },

    /// No active stake record exists for the account.
    #[error("No active stake for account {account}")]
    NoActiveStake { account: Address },

    /// The stake lock period has not elapsed yet.
    #[error("Lock period not elapsed: unlocks at {unlock_time}, now is {now}")]
    LockNotElapsed { unlock_time: Timestamp, now: Timestamp },

    /// The pending reward is zero.
    #[error("No rewards available")]
    NoRewardsAvailable,

    /// A mutating call re-entered the core while an operation was in
    /// progress.
    #[error("Reentrant call rejected")]
    ReentrancyDetected,

    /// Genesis configuration error (unreadable file, bad owner address).
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        LedgerError::Serialization(e.to_string())
    }
}
