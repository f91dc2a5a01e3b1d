// crates/nacre-ledger/src/config.rs
//
// Genesis configuration for the NACRE core.
// Loaded from a TOML file or populated with the genesis defaults.

use std::fs;

use serde::{Deserialize, Serialize};

use nacre_core::{Address, LedgerError};

use crate::token::{DEFAULT_APY_PERCENT, DEFAULT_LOCK_PERIOD_SECS, PEARL_PER_NCR};

/// Parameters the core is constructed with.
///
/// Every field except `owner` has a genesis default, so a minimal config
/// file is just the owner address:
///
/// ```toml
/// owner = "0x0101...01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Hex-encoded owner address. Receives the genesis supply and holds
    /// the administrative privileges.
    pub owner: String,

    /// Genesis supply in whole NCR, minted to the owner at construction.
    #[serde(default = "default_genesis_supply_ncr")]
    pub genesis_supply_ncr: u64,

    /// Initial pool APY in percent.
    #[serde(default = "default_apy_percent")]
    pub apy_percent: u64,

    /// Initial stake lock period in seconds.
    #[serde(default = "default_lock_period_secs")]
    pub lock_period_secs: u64,

    /// Whether the pool accepts stakes at genesis.
    #[serde(default = "default_staking_active")]
    pub staking_active: bool,
}

fn default_genesis_supply_ncr() -> u64 {
    100_000_000_000
}

fn default_apy_percent() -> u64 {
    DEFAULT_APY_PERCENT
}

fn default_lock_period_secs() -> u64 {
    DEFAULT_LOCK_PERIOD_SECS
}

fn default_staking_active() -> bool {
    true
}

impl GenesisConfig {
    /// A config with all genesis defaults for the given owner.
    pub fn for_owner(owner: Address) -> Self {
        Self {
            owner: owner.to_string(),
            genesis_supply_ncr: default_genesis_supply_ncr(),
            apy_percent: default_apy_percent(),
            lock_period_secs: default_lock_period_secs(),
            staking_active: default_staking_active(),
        }
    }

    /// Load configuration from a TOML file at the given path.
    ///
    /// # Errors
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, LedgerError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("cannot read {}: {}", path, e)))?;
        toml::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("cannot parse {}: {}", path, e)))
    }

    /// Parse and validate the configured owner address.
    ///
    /// # Errors
    /// Returns `Config` if the address is malformed, null, or the stake
    /// reserve.
    pub fn owner_address(&self) -> Result<Address, LedgerError> {
        let owner: Address = self
            .owner
            .parse()
            .map_err(|e| LedgerError::Config(format!("bad owner address: {}", e)))?;
        if owner.is_null() || owner == Address::STAKE_RESERVE {
            return Err(LedgerError::Config(
                "owner must not be the null address or the stake reserve".to_string(),
            ));
        }
        Ok(owner)
    }

    /// Genesis supply converted to pearl.
    pub fn genesis_supply_pearl(&self) -> u128 {
        (self.genesis_supply_ncr as u128).saturating_mul(PEARL_PER_NCR)
    }
}
