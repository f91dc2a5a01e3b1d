// crates/nacre-ledger/src/events.rs
//
// Ledger events. Every successful mutating operation produces exactly one
// event, logged via tracing and forwarded to the registered hook (if any).

use serde::{Deserialize, Serialize};

use nacre_core::{Address, Timestamp};

/// The effect of a successful mutating operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Transfer {
        from: Address,
        to: Address,
        amount: u128,
    },
    Minted {
        to: Address,
        amount: u128,
    },
    Burned {
        account: Address,
        amount: u128,
    },
    Staked {
        account: Address,
        amount: u128,
        start_time: Timestamp,
        lock_period: u64,
    },
    Unstaked {
        account: Address,
        principal: u128,
        reward: u128,
    },
    RewardsClaimed {
        account: Address,
        reward: u128,
    },
    PoolUpdated {
        apy_percent: u64,
        lock_period: u64,
    },
    StakingActiveSet {
        active: bool,
    },
    Paused,
    Unpaused,
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
}

impl Event {
    /// Whether this event was produced by an owner-gated administrative
    /// operation.
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Event::PoolUpdated { .. }
                | Event::StakingActiveSet { .. }
                | Event::Paused
                | Event::Unpaused
                | Event::OwnershipTransferred { .. }
        )
    }
}
