// crates/nacre-ledger/src/lib.rs
//
// nacre-ledger: the NACRE Token & Staking Core.
//
// A fungible-token ledger with an embedded single-pool staking and
// reward-accrual engine, modeled as a strictly serialized state machine.
// Every mutating operation either fully applies and emits one event, or
// fails with a distinct error kind and leaves all state untouched.
//
// All monetary values are tracked in pearl (the smallest unit of NACRE).
// 1 NCR = 1,000,000,000,000,000,000 pearl (10^18).

pub mod access;
pub mod config;
pub mod engine;
pub mod events;
pub mod ledger;
pub mod ops;
pub mod rewards;
pub mod shared;
pub mod staking;
pub mod token;

// Re-export key types for ergonomic access from downstream crates.
pub use config::GenesisConfig;
pub use engine::{EventHook, LedgerEngine, StakingInfo, UnstakeReceipt};
pub use events::Event;
pub use ledger::Ledger;
pub use ops::Operation;
pub use rewards::pending_reward;
pub use shared::SharedEngine;
pub use staking::{StakeBook, StakeRecord, StakingPool};
pub use token::{
    Ncr, Pearl, DEFAULT_APY_PERCENT, DEFAULT_LOCK_PERIOD_SECS, GENESIS_SUPPLY_PEARL,
    MAX_STAKE_PEARL, MIN_STAKE_PEARL, PEARL_PER_NCR, SECONDS_PER_YEAR,
};
