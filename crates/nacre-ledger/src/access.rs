// crates/nacre-ledger/src/access.rs
//
// Access control: the owner address and the global pause flag.
//
// Both flags are set at construction and mutated only through the
// owner-gated calls below. While paused, all balance-mutating operations
// except owner mint are blocked by the engine.

use serde::{Deserialize, Serialize};

use nacre_core::{Address, LedgerError};

/// Owner and pause state for the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Address,
    paused: bool,
}

impl AccessControl {
    /// Create with the given owner, unpaused.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            paused: false,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Reject callers other than the owner.
    pub fn require_owner(&self, caller: &Address) -> Result<(), LedgerError> {
        if *caller != self.owner {
            return Err(LedgerError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    /// Reject while the system is paused.
    pub fn ensure_active(&self) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::SystemPaused);
        }
        Ok(())
    }

    /// Pause the system. Owner-only.
    pub fn pause(&mut self, caller: &Address) -> Result<(), LedgerError> {
        self.require_owner(caller)?;
        self.paused = true;
        Ok(())
    }

    /// Unpause the system. Owner-only.
    pub fn unpause(&mut self, caller: &Address) -> Result<(), LedgerError> {
        self.require_owner(caller)?;
        self.paused = false;
        Ok(())
    }

    /// Hand ownership to a new address. Owner-only; the null address is not
    /// a valid owner.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<(), LedgerError> {
        self.require_owner(caller)?;
        if new_owner.is_null() {
            return Err(LedgerError::InvalidRecipient {
                recipient: new_owner,
            });
        }
        self.owner = new_owner;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        Address::new([tag; 32])
    }

    #[test]
    fn test_starts_unpaused() {
        let access = AccessControl::new(addr(1));
        assert!(!access.is_paused());
        assert!(access.ensure_active().is_ok());
    }

    #[test]
    fn test_require_owner() {
        let access = AccessControl::new(addr(1));
        assert!(access.require_owner(&addr(1)).is_ok());
        assert!(matches!(
            access.require_owner(&addr(2)),
            Err(LedgerError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_pause_owner_only() {
        let mut access = AccessControl::new(addr(1));
        assert!(matches!(
            access.pause(&addr(2)),
            Err(LedgerError::Unauthorized { .. })
        ));
        access.pause(&addr(1)).unwrap();
        assert!(matches!(
            access.ensure_active(),
            Err(LedgerError::SystemPaused)
        ));
    }

    #[test]
    fn test_unpause_restores() {
        let mut access = AccessControl::new(addr(1));
        access.pause(&addr(1)).unwrap();
        access.unpause(&addr(1)).unwrap();
        assert!(access.ensure_active().is_ok());
    }

    #[test]
    fn test_transfer_ownership() {
        let mut access = AccessControl::new(addr(1));
        access.transfer_ownership(&addr(1), addr(2)).unwrap();
        assert_eq!(access.owner(), addr(2));
        // Old owner loses privileges
        assert!(access.require_owner(&addr(1)).is_err());
        assert!(access.require_owner(&addr(2)).is_ok());
    }

    #[test]
    fn test_transfer_ownership_to_null_rejected() {
        let mut access = AccessControl::new(addr(1));
        let result = access.transfer_ownership(&addr(1), Address::NULL);
        assert!(matches!(result, Err(LedgerError::InvalidRecipient { .. })));
        assert_eq!(access.owner(), addr(1));
    }
}
