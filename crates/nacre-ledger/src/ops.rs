// crates/nacre-ledger/src/ops.rs
//
// Typed operation interface: every mutation request the core accepts, as a
// tagged enum dispatched through the serialized engine. The caller address
// is the implicit sender for holder operations and the subject of the
// owner check for administrative ones.

use serde::{Deserialize, Serialize};

use nacre_core::{Address, LedgerError};

use crate::engine::LedgerEngine;
use crate::events::Event;

/// A mutation request against the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Move spendable balance from the caller to `to`.
    Transfer { to: Address, amount: u128 },
    /// Mint new tokens to `to`. Owner-only.
    Mint { to: Address, amount: u128 },
    /// Burn from the caller's own balance.
    Burn { amount: u128 },
    /// Stake from the caller's spendable balance.
    Stake { amount: u128 },
    /// Unstake the caller's position after the lock period.
    Unstake,
    /// Claim the caller's pending reward.
    ClaimRewards,
    /// Replace the pool's reward parameters. Owner-only.
    UpdateStakingPool { apy_percent: u64, lock_period: u64 },
    /// Open or close the pool to new stakes. Owner-only.
    SetStakingActive { active: bool },
    /// Pause balance-mutating operations. Owner-only.
    Pause,
    /// Lift the pause. Owner-only.
    Unpause,
    /// Hand ownership to a new address. Owner-only.
    TransferOwnership { new_owner: Address },
}

impl LedgerEngine {
    /// Execute a typed operation on behalf of `caller`, returning the
    /// event the operation produced.
    pub fn execute(&mut self, caller: Address, op: Operation) -> Result<Event, LedgerError> {
        match op {
            Operation::Transfer { to, amount } => {
                self.transfer(caller, to, amount)?;
                Ok(Event::Transfer {
                    from: caller,
                    to,
                    amount,
                })
            }
            Operation::Mint { to, amount } => {
                self.mint(caller, to, amount)?;
                Ok(Event::Minted { to, amount })
            }
            Operation::Burn { amount } => {
                self.burn(caller, amount)?;
                Ok(Event::Burned {
                    account: caller,
                    amount,
                })
            }
            Operation::Stake { amount } => {
                let record = self.stake(caller, amount)?;
                Ok(Event::Staked {
                    account: caller,
                    amount: record.amount,
                    start_time: record.start_time,
                    lock_period: record.lock_period,
                })
            }
            Operation::Unstake => {
                let receipt = self.unstake(caller)?;
                Ok(Event::Unstaked {
                    account: caller,
                    principal: receipt.principal,
                    reward: receipt.reward,
                })
            }
            Operation::ClaimRewards => {
                let reward = self.claim_rewards(caller)?;
                Ok(Event::RewardsClaimed {
                    account: caller,
                    reward,
                })
            }
            Operation::UpdateStakingPool {
                apy_percent,
                lock_period,
            } => {
                self.update_staking_pool(caller, apy_percent, lock_period)?;
                Ok(Event::PoolUpdated {
                    apy_percent,
                    lock_period,
                })
            }
            Operation::SetStakingActive { active } => {
                self.set_staking_active(caller, active)?;
                Ok(Event::StakingActiveSet { active })
            }
            Operation::Pause => {
                self.pause(caller)?;
                Ok(Event::Paused)
            }
            Operation::Unpause => {
                self.unpause(caller)?;
                Ok(Event::Unpaused)
            }
            Operation::TransferOwnership { new_owner } => {
                self.transfer_ownership(caller, new_owner)?;
                Ok(Event::OwnershipTransferred {
                    previous_owner: caller,
                    new_owner,
                })
            }
        }
    }
}
