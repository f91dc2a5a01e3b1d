// crates/nacre-ledger/src/staking.rs
//
// Stake records and the global staking pool.
//
// The stake book owns per-account stake records and enforces the
// single-active-stake rule: an address holds at most one active record,
// created by stake, snapshot-reset by claim, deleted by unstake. The pool
// is the single global aggregate of all active stakes and the admin-set
// reward parameters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use nacre_core::{Address, LedgerError, Timestamp};

/// A single account's active stake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRecord {
    /// Staked principal in pearl. Rewards accrue against this original
    /// amount; accrued-but-unclaimed rewards do not compound.
    pub amount: u128,
    /// Unix time at which the stake was created.
    pub start_time: Timestamp,
    /// Lock duration in seconds, captured from the pool at stake time.
    pub lock_period: u64,
    /// Unix time from which unclaimed rewards accrue. Equals `start_time`
    /// at creation; reset to the claim time on every reward claim.
    pub snapshot_time: Timestamp,
    /// Whether this record is live.
    pub is_active: bool,
}

impl StakeRecord {
    /// Unix time at and after which unstaking is permitted.
    pub fn unlock_time(&self) -> Timestamp {
        self.start_time.saturating_add(self.lock_period)
    }
}

/// All stake records, keyed by account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StakeBook {
    records: HashMap<Address, StakeRecord>,
}

impl StakeBook {
    /// Create an empty stake book.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active stake record for an account, if any.
    pub fn get(&self, account: &Address) -> Option<&StakeRecord> {
        self.records.get(account).filter(|r| r.is_active)
    }

    /// Mutable access to an account's active record (claim resets the
    /// snapshot through this).
    ///
    /// # Errors
    /// Returns `NoActiveStake` if the account has no active record.
    pub fn get_mut(&mut self, account: &Address) -> Result<&mut StakeRecord, LedgerError> {
        self.records
            .get_mut(account)
            .filter(|r| r.is_active)
            .ok_or(LedgerError::NoActiveStake { account: *account })
    }

    /// Insert a new stake record for an account.
    ///
    /// # Errors
    /// Returns `AlreadyStaked` if the account already has an active record.
    pub fn insert(&mut self, account: Address, record: StakeRecord) -> Result<(), LedgerError> {
        if self.get(&account).is_some() {
            return Err(LedgerError::AlreadyStaked { account });
        }
        self.records.insert(account, record);
        Ok(())
    }

    /// Remove and return an account's active stake record.
    ///
    /// # Errors
    /// Returns `NoActiveStake` if the account has no active record.
    pub fn remove(&mut self, account: &Address) -> Result<StakeRecord, LedgerError> {
        if self.get(account).is_none() {
            return Err(LedgerError::NoActiveStake { account: *account });
        }
        self.records
            .remove(account)
            .ok_or(LedgerError::NoActiveStake { account: *account })
    }

    /// Number of active stake records.
    pub fn active_count(&self) -> usize {
        self.records.values().filter(|r| r.is_active).count()
    }
}

/// The single global staking pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingPool {
    /// Sum of all active staked principal, in pearl. Mirrors the stake
    /// reserve's ledger balance.
    pub total_staked: u128,
    /// Cumulative rewards minted by claims and unstakes, in pearl.
    pub total_rewards_paid: u128,
    /// Annual percentage yield, applied linearly. Read at call time, so
    /// changes apply retroactively to unclaimed windows.
    pub apy_percent: u64,
    /// Lock period in seconds applied to newly created stakes.
    pub lock_period: u64,
    /// Whether new stakes are accepted. Does not gate unstake or claim.
    pub is_active: bool,
}

impl StakingPool {
    /// Create a pool with the given parameters and zero totals.
    pub fn new(apy_percent: u64, lock_period: u64, is_active: bool) -> Self {
        Self {
            total_staked: 0,
            total_rewards_paid: 0,
            apy_percent,
            lock_period,
            is_active,
        }
    }

    /// Replace the reward parameters. Takes effect immediately: the new
    /// lock period applies to future stakes, the new APY to all unclaimed
    /// reward windows.
    pub fn update(&mut self, apy_percent: u64, lock_period: u64) {
        self.apy_percent = apy_percent;
        self.lock_period = lock_period;
    }

    /// Open or close the pool to new stakes.
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}
