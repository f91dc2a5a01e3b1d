// crates/nacre-ledger/src/ledger.rs
//
// Balance ledger: per-account balances and supply counters.
//
// The ledger owns balance state exclusively and enforces conservation of
// value: the sum of all balances (the stake reserve included) equals
// total_supply at every observation point. Pause and ownership policy live
// in the engine, not here — this module is pure balance arithmetic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use nacre_core::{Address, LedgerError};

/// Account balances and supply counters for the NACRE token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// Per-account balances in pearl.
    balances: HashMap<Address, u128>,
    /// Current total supply in pearl. Increased by mint, decreased by burn.
    total_supply: u128,
    /// Cumulative amount burned over the ledger's lifetime, in pearl.
    total_burned: u128,
}

impl Ledger {
    /// Create an empty ledger with zero supply.
    pub fn new() -> Self {
        Self::default()
    }

    /// The spendable balance of an account, in pearl. Zero for unknown
    /// accounts.
    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Current total supply in pearl.
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Cumulative burned amount in pearl.
    pub fn total_burned(&self) -> u128 {
        self.total_burned
    }

    /// Sum of all account balances, in pearl. Equals `total_supply` by the
    /// conservation invariant; exposed so callers and tests can observe it.
    pub fn balance_total(&self) -> u128 {
        self.balances.values().sum()
    }

    /// Transfer between accounts on behalf of an external caller.
    ///
    /// # Errors
    /// - `InvalidRecipient` if `to` is the null address or the stake
    ///   reserve (the reserve is contract custody, not a deposit target).
    /// - `InsufficientBalance` if `from` does not cover `amount`.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if to.is_null() || *to == Address::STAKE_RESERVE {
            return Err(LedgerError::InvalidRecipient { recipient: *to });
        }
        self.move_balance(from, to, amount)
    }

    /// Move balance between accounts with no recipient policy. Used by the
    /// engine for escrow transfers in and out of the stake reserve.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `from` does not cover `amount`.
    pub(crate) fn move_balance(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.debit(from, amount)?;
        self.credit(to, amount);
        Ok(())
    }

    /// Mint new tokens to an account, increasing total supply.
    ///
    /// Ownership gating is the engine's responsibility; this validates the
    /// amount and recipient only.
    ///
    /// # Errors
    /// Returns `InvalidAmount` if `amount` is zero or `to` is the null
    /// address.
    pub fn mint(&mut self, to: &Address, amount: u128) -> Result<(), LedgerError> {
        if amount == 0 || to.is_null() {
            return Err(LedgerError::InvalidAmount);
        }
        self.credit(to, amount);
        self.total_supply = self.total_supply.saturating_add(amount);
        Ok(())
    }

    /// Burn tokens from an account's own balance, decreasing total supply.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `amount` exceeds the account
    /// balance.
    pub fn burn(&mut self, account: &Address, amount: u128) -> Result<(), LedgerError> {
        self.debit(account, amount)?;
        self.total_supply = self.total_supply.saturating_sub(amount);
        self.total_burned = self.total_burned.saturating_add(amount);
        Ok(())
    }

    fn credit(&mut self, account: &Address, amount: u128) {
        let balance = self.balances.entry(*account).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    fn debit(&mut self, account: &Address, amount: u128) -> Result<(), LedgerError> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        if let Some(balance) = self.balances.get_mut(account) {
            *balance -= amount;
        }
        Ok(())
    }
}
