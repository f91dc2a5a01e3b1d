// crates/nacre-ledger/src/shared.rs
//
// SharedEngine: the single-global-mutex realization of the core's
// concurrency model for multi-threaded callers.
//
// Every mutating operation executes to completion under the lock before
// the next is observed; no finer-grained locking exists. Constructed once,
// then cloned into whichever tasks need a handle.

use std::sync::{Arc, Mutex, PoisonError};

use nacre_core::{Address, LedgerError};

use crate::engine::{LedgerEngine, StakingInfo};
use crate::events::Event;
use crate::ops::Operation;
use crate::staking::StakingPool;

/// A cloneable, thread-safe handle to the core.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<LedgerEngine>>,
}

impl SharedEngine {
    pub fn new(engine: LedgerEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Execute a typed operation under the global lock.
    pub fn execute(&self, caller: Address, op: Operation) -> Result<Event, LedgerError> {
        self.lock().execute(caller, op)
    }

    pub fn balance_of(&self, account: &Address) -> u128 {
        self.lock().balance_of(account)
    }

    pub fn total_supply(&self) -> u128 {
        self.lock().total_supply()
    }

    pub fn staking_info(&self, account: &Address) -> StakingInfo {
        self.lock().staking_info(account)
    }

    pub fn pool_info(&self) -> StakingPool {
        self.lock().pool_info()
    }

    pub fn owner(&self) -> Address {
        self.lock().owner()
    }

    pub fn is_paused(&self) -> bool {
        self.lock().is_paused()
    }

    // Operations never partially apply, so a poisoned lock still holds a
    // consistent engine.
    fn lock(&self) -> std::sync::MutexGuard<'_, LedgerEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenesisConfig;
    use crate::token::MIN_STAKE_PEARL;

    fn addr(tag: u8) -> Address {
        Address::new([tag; 32])
    }

    fn shared() -> SharedEngine {
        SharedEngine::new(LedgerEngine::new(&GenesisConfig::for_owner(addr(1))).unwrap())
    }

    #[test]
    fn test_clones_share_state() {
        let a = shared();
        let b = a.clone();
        a.execute(
            addr(1),
            Operation::Transfer {
                to: addr(2),
                amount: 42,
            },
        )
        .unwrap();
        assert_eq!(b.balance_of(&addr(2)), 42);
    }

    #[test]
    fn test_concurrent_stakes_serialize() {
        let engine = shared();
        // Fund two accounts, then stake from both threads; exactly one
        // record per account, totals consistent.
        for tag in [2u8, 3u8] {
            engine
                .execute(
                    addr(1),
                    Operation::Transfer {
                        to: addr(tag),
                        amount: MIN_STAKE_PEARL,
                    },
                )
                .unwrap();
        }

        let handles: Vec<_> = [2u8, 3u8]
            .into_iter()
            .map(|tag| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    engine.execute(
                        addr(tag),
                        Operation::Stake {
                            amount: MIN_STAKE_PEARL,
                        },
                    )
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        assert_eq!(engine.pool_info().total_staked, 2 * MIN_STAKE_PEARL);
        assert!(engine.staking_info(&addr(2)).is_staked);
        assert!(engine.staking_info(&addr(3)).is_staked);
    }
}
