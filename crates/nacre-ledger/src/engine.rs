// crates/nacre-ledger/src/engine.rs
//
// The serialized operation engine for the NACRE Token & Staking Core.
//
// `LedgerEngine` owns all core state (ledger, stake book, pool, access
// control) and executes every mutating operation as a single indivisible
// unit: all preconditions are validated before any state is touched, so a
// failure leaves the core exactly as it was. A reentrancy flag guards
// stake, unstake, and claim for their full duration — including the event
// hook call — so a hook that calls back into the engine is rejected.
//
// Staked principal is escrowed by a ledger transfer into the stake reserve
// and returned from it on unstake; rewards are minted, increasing supply.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use nacre_core::{Address, Clock, LedgerError, SystemClock, Timestamp};

use crate::access::AccessControl;
use crate::config::GenesisConfig;
use crate::events::Event;
use crate::ledger::Ledger;
use crate::rewards::pending_reward;
use crate::staking::{StakeBook, StakeRecord, StakingPool};
use crate::token::{MAX_STAKE_PEARL, MIN_STAKE_PEARL};

/// Callback invoked with each event after the producing operation has
/// fully applied. Receives the engine so observers can read state; a
/// mutating call back into the engine from inside the hook is rejected
/// while a staking operation is in progress.
pub type EventHook = Box<dyn FnMut(&mut LedgerEngine, &Event) + Send>;

/// Outcome of a successful unstake: returned principal and minted reward,
/// both in pearl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnstakeReceipt {
    pub principal: u128,
    pub reward: u128,
}

/// Read-only view of an account's staking position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingInfo {
    /// Staked principal in pearl. Zero when not staked.
    pub amount: u128,
    /// Unix time the stake was created.
    pub start_time: Timestamp,
    /// Unix time at and after which unstaking is permitted.
    pub lock_end_time: Timestamp,
    /// Pending reward at query time, in pearl.
    pub current_reward: u128,
    /// Whether the account has an active stake.
    pub is_staked: bool,
}

/// The Token & Staking Core: a strictly serialized state machine over the
/// ledger, the stake book, the single pool, and the access flags.
pub struct LedgerEngine {
    ledger: Ledger,
    stakes: StakeBook,
    pool: StakingPool,
    access: AccessControl,
    clock: Arc<dyn Clock>,
    entered: bool,
    event_hook: Option<EventHook>,
}

impl LedgerEngine {
    /// Construct the core from genesis configuration: mints the genesis
    /// supply to the owner and initializes the pool with the configured
    /// parameters. Uses the wall clock; swap it with [`with_clock`].
    ///
    /// [`with_clock`]: LedgerEngine::with_clock
    ///
    /// # Errors
    /// Returns `Config` if the owner address is invalid, or the mint error
    /// if the genesis supply is zero.
    pub fn new(config: &GenesisConfig) -> Result<Self, LedgerError> {
        let owner = config.owner_address()?;
        let mut ledger = Ledger::new();
        ledger.mint(&owner, config.genesis_supply_pearl())?;

        Ok(Self {
            ledger,
            stakes: StakeBook::new(),
            pool: StakingPool::new(
                config.apy_percent,
                config.lock_period_secs,
                config.staking_active,
            ),
            access: AccessControl::new(owner),
            clock: Arc::new(SystemClock),
            entered: false,
            event_hook: None,
        })
    }

    /// Replace the clock (deterministic tests drive a `ManualClock`).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register a hook invoked with each event after its operation has
    /// applied.
    pub fn with_event_hook(mut self, hook: EventHook) -> Self {
        self.event_hook = Some(hook);
        self
    }

    // -----------------------------------------------------------------
    // Ledger operations
    // -----------------------------------------------------------------

    /// Transfer spendable balance between accounts.
    ///
    /// # Errors
    /// `SystemPaused`, `InvalidRecipient` (null address or stake reserve),
    /// `InsufficientBalance`.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.ensure_not_entered()?;
        self.access.ensure_active()?;
        self.ledger.transfer(&from, &to, amount)?;
        self.dispatch(Event::Transfer { from, to, amount });
        Ok(())
    }

    /// Mint new tokens. Owner-only; available while paused.
    ///
    /// # Errors
    /// `Unauthorized`, `InvalidAmount` (zero amount or null recipient).
    pub fn mint(&mut self, caller: Address, to: Address, amount: u128) -> Result<(), LedgerError> {
        self.ensure_not_entered()?;
        self.access.require_owner(&caller)?;
        self.ledger.mint(&to, amount)?;
        self.dispatch(Event::Minted { to, amount });
        Ok(())
    }

    /// Burn tokens from the caller's own balance.
    ///
    /// # Errors
    /// `SystemPaused`, `InsufficientBalance`.
    pub fn burn(&mut self, account: Address, amount: u128) -> Result<(), LedgerError> {
        self.ensure_not_entered()?;
        self.access.ensure_active()?;
        self.ledger.burn(&account, amount)?;
        self.dispatch(Event::Burned { account, amount });
        Ok(())
    }

    // -----------------------------------------------------------------
    // Staking operations (reentrancy-guarded)
    // -----------------------------------------------------------------

    /// Stake spendable balance into the pool. Escrows the amount into the
    /// stake reserve and creates the account's stake record.
    ///
    /// # Errors
    /// `ReentrancyDetected`, `SystemPaused`, then the staking
    /// preconditions in order: `StakingInactive`, `AmountOutOfRange`,
    /// `InsufficientBalance`, `AlreadyStaked`.
    pub fn stake(&mut self, account: Address, amount: u128) -> Result<StakeRecord, LedgerError> {
        self.enter()?;
        let outcome = self.stake_locked(account, amount);
        let outcome = match outcome {
            Ok((event, record)) => {
                self.dispatch(event);
                Ok(record)
            }
            Err(e) => Err(e),
        };
        self.entered = false;
        outcome
    }

    fn stake_locked(
        &mut self,
        account: Address,
        amount: u128,
    ) -> Result<(Event, StakeRecord), LedgerError> {
        self.access.ensure_active()?;
        if !self.pool.is_active {
            return Err(LedgerError::StakingInactive);
        }
        if amount < MIN_STAKE_PEARL || amount > MAX_STAKE_PEARL {
            return Err(LedgerError::AmountOutOfRange {
                amount,
                min: MIN_STAKE_PEARL,
                max: MAX_STAKE_PEARL,
            });
        }
        let available = self.ledger.balance_of(&account);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        if self.stakes.get(&account).is_some() {
            return Err(LedgerError::AlreadyStaked { account });
        }

        // All preconditions hold; mutate.
        let now = self.clock.now();
        self.ledger
            .move_balance(&account, &Address::STAKE_RESERVE, amount)?;
        let record = StakeRecord {
            amount,
            start_time: now,
            lock_period: self.pool.lock_period,
            snapshot_time: now,
            is_active: true,
        };
        self.stakes.insert(account, record.clone())?;
        self.pool.total_staked = self.pool.total_staked.saturating_add(amount);

        let event = Event::Staked {
            account,
            amount,
            start_time: now,
            lock_period: record.lock_period,
        };
        Ok((event, record))
    }

    /// Unstake after the lock period: pays the pending reward by mint,
    /// returns the escrowed principal, and deletes the stake record.
    ///
    /// # Errors
    /// `ReentrancyDetected`, `SystemPaused`, `NoActiveStake`,
    /// `LockNotElapsed` (succeeds exactly at `start_time + lock_period`).
    pub fn unstake(&mut self, account: Address) -> Result<UnstakeReceipt, LedgerError> {
        self.enter()?;
        let outcome = self.unstake_locked(account);
        let outcome = match outcome {
            Ok((event, receipt)) => {
                self.dispatch(event);
                Ok(receipt)
            }
            Err(e) => Err(e),
        };
        self.entered = false;
        outcome
    }

    fn unstake_locked(
        &mut self,
        account: Address,
    ) -> Result<(Event, UnstakeReceipt), LedgerError> {
        self.access.ensure_active()?;
        let now = self.clock.now();
        let record = self
            .stakes
            .get(&account)
            .cloned()
            .ok_or(LedgerError::NoActiveStake { account })?;
        let unlock_time = record.unlock_time();
        if now < unlock_time {
            return Err(LedgerError::LockNotElapsed { unlock_time, now });
        }
        let reward = pending_reward(&record, self.pool.apy_percent, now);

        // All preconditions hold; mutate.
        self.stakes.remove(&account)?;
        self.pool.total_staked = self.pool.total_staked.saturating_sub(record.amount);
        self.pool.total_rewards_paid = self.pool.total_rewards_paid.saturating_add(reward);
        self.ledger
            .move_balance(&Address::STAKE_RESERVE, &account, record.amount)?;
        if reward > 0 {
            self.ledger.mint(&account, reward)?;
        }

        let receipt = UnstakeReceipt {
            principal: record.amount,
            reward,
        };
        let event = Event::Unstaked {
            account,
            principal: record.amount,
            reward,
        };
        Ok((event, receipt))
    }

    /// Claim the pending reward without unstaking. Mints the reward and
    /// resets the record's snapshot time so future rewards accrue only on
    /// the unclaimed remainder of the timeline.
    ///
    /// # Errors
    /// `ReentrancyDetected`, `SystemPaused`, `NoActiveStake`,
    /// `NoRewardsAvailable` (zero pending reward).
    pub fn claim_rewards(&mut self, account: Address) -> Result<u128, LedgerError> {
        self.enter()?;
        let outcome = self.claim_locked(account);
        let outcome = match outcome {
            Ok((event, reward)) => {
                self.dispatch(event);
                Ok(reward)
            }
            Err(e) => Err(e),
        };
        self.entered = false;
        outcome
    }

    fn claim_locked(&mut self, account: Address) -> Result<(Event, u128), LedgerError> {
        self.access.ensure_active()?;
        let now = self.clock.now();
        let apy_percent = self.pool.apy_percent;
        let record = self.stakes.get_mut(&account)?;
        let reward = pending_reward(record, apy_percent, now);
        if reward == 0 {
            return Err(LedgerError::NoRewardsAvailable);
        }

        // All preconditions hold; mutate.
        record.snapshot_time = now;
        self.pool.total_rewards_paid = self.pool.total_rewards_paid.saturating_add(reward);
        self.ledger.mint(&account, reward)?;

        Ok((Event::RewardsClaimed { account, reward }, reward))
    }

    // -----------------------------------------------------------------
    // Administration (owner-only; available while paused)
    // -----------------------------------------------------------------

    /// Replace the pool's APY and lock period. The new lock period applies
    /// to future stakes; the new APY applies retroactively to the entire
    /// unclaimed-reward window of existing stakes, since reward math reads
    /// the pool's current APY at call time.
    pub fn update_staking_pool(
        &mut self,
        caller: Address,
        apy_percent: u64,
        lock_period: u64,
    ) -> Result<(), LedgerError> {
        self.ensure_not_entered()?;
        self.access.require_owner(&caller)?;
        self.pool.update(apy_percent, lock_period);
        self.dispatch(Event::PoolUpdated {
            apy_percent,
            lock_period,
        });
        Ok(())
    }

    /// Open or close the pool to new stakes. Does not affect unstake or
    /// claim on existing positions.
    pub fn set_staking_active(&mut self, caller: Address, active: bool) -> Result<(), LedgerError> {
        self.ensure_not_entered()?;
        self.access.require_owner(&caller)?;
        self.pool.set_active(active);
        self.dispatch(Event::StakingActiveSet { active });
        Ok(())
    }

    /// Pause all balance-mutating operations except owner mint.
    pub fn pause(&mut self, caller: Address) -> Result<(), LedgerError> {
        self.ensure_not_entered()?;
        self.access.pause(&caller)?;
        self.dispatch(Event::Paused);
        Ok(())
    }

    /// Lift the pause.
    pub fn unpause(&mut self, caller: Address) -> Result<(), LedgerError> {
        self.ensure_not_entered()?;
        self.access.unpause(&caller)?;
        self.dispatch(Event::Unpaused);
        Ok(())
    }

    /// Hand ownership to a new address.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), LedgerError> {
        self.ensure_not_entered()?;
        self.access.transfer_ownership(&caller, new_owner)?;
        self.dispatch(Event::OwnershipTransferred {
            previous_owner: caller,
            new_owner,
        });
        Ok(())
    }

    // -----------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------

    /// Spendable balance of an account, in pearl.
    pub fn balance_of(&self, account: &Address) -> u128 {
        self.ledger.balance_of(account)
    }

    /// Current total supply in pearl.
    pub fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    /// Cumulative burned amount in pearl.
    pub fn total_burned(&self) -> u128 {
        self.ledger.total_burned()
    }

    /// Staked principal held in the reserve, in pearl. Equals
    /// `pool_info().total_staked`.
    pub fn escrowed_total(&self) -> u128 {
        self.ledger.balance_of(&Address::STAKE_RESERVE)
    }

    /// Sum of all balances (reserve included), in pearl. Equals
    /// `total_supply` by the conservation invariant.
    pub fn balance_total(&self) -> u128 {
        self.ledger.balance_total()
    }

    /// An account's staking position, with the pending reward computed at
    /// query time. Zeroed with `is_staked = false` for non-stakers.
    pub fn staking_info(&self, account: &Address) -> StakingInfo {
        match self.stakes.get(account) {
            Some(record) => StakingInfo {
                amount: record.amount,
                start_time: record.start_time,
                lock_end_time: record.unlock_time(),
                current_reward: pending_reward(record, self.pool.apy_percent, self.clock.now()),
                is_staked: true,
            },
            None => StakingInfo::default(),
        }
    }

    /// The global pool record: totals, APY, lock period, activation flag.
    pub fn pool_info(&self) -> StakingPool {
        self.pool.clone()
    }

    /// The current owner address.
    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    /// Whether the system is paused.
    pub fn is_paused(&self) -> bool {
        self.access.is_paused()
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn enter(&mut self) -> Result<(), LedgerError> {
        self.ensure_not_entered()?;
        self.entered = true;
        Ok(())
    }

    fn ensure_not_entered(&self) -> Result<(), LedgerError> {
        if self.entered {
            return Err(LedgerError::ReentrancyDetected);
        }
        Ok(())
    }

    /// Log the event and forward it to the registered hook. The hook runs
    /// with the reentrancy flag still held for staking operations.
    fn dispatch(&mut self, event: Event) {
        if event.is_admin() {
            tracing::info!(event = ?event, "ledger event");
        } else {
            tracing::debug!(event = ?event, "ledger event");
        }
        if let Some(mut hook) = self.event_hook.take() {
            hook(self, &event);
            self.event_hook = Some(hook);
        }
    }
}
