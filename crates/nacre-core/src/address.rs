// crates/nacre-core/src/address.rs
//
// Account addresses for the NACRE ledger.
//
// An address is an opaque 32-byte identifier. The core never interprets it;
// authorization is caller-identity based, so signature schemes belong to the
// outer layers. Two addresses are distinguished: the null address (all
// zeros), which is never a valid transfer recipient, and the stake reserve,
// the contract-custody account that holds escrowed staking principal.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// A 32-byte account address.
///
/// Serializes as a `0x`-prefixed hex string so JSON maps keyed by address
/// are well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// The null address (all zeros). Never a valid recipient.
    pub const NULL: Address = Address([0u8; 32]);

    /// The stake escrow reserve. Holds staked principal under contract
    /// custody; external transfers may not name it as a recipient.
    pub const STAKE_RESERVE: Address = Address([0xFF; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Address(bytes)
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = String;

    /// Parse a 64-character hex string, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if hex.len() != 64 {
            return Err(format!(
                "address must be 64 hex characters, got {}",
                hex.len()
            ));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in bytes.iter_mut().enumerate() {
            let pair = &hex[i * 2..i * 2 + 2];
            *chunk = u8::from_str_radix(pair, 16)
                .map_err(|_| format!("invalid hex at position {}", i * 2))?;
        }
        Ok(Address(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_null_address() {
        assert!(Address::NULL.is_null());
        assert!(!Address::new([1u8; 32]).is_null());
    }

    #[test]
    fn test_display_round_trip() {
        let addr = Address::new([0xAB; 32]);
        let s = addr.to_string();
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 66);
        assert_eq!(s.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn test_parse_without_prefix() {
        let addr = Address::new([0x01; 32]);
        let bare = addr.to_string().trim_start_matches("0x").to_string();
        assert_eq!(bare.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert!("0x1234".parse::<Address>().is_err());
    }

    #[test]
    fn test_parse_rejects_bad_hex() {
        let bad = "zz".repeat(32);
        assert!(bad.parse::<Address>().is_err());
    }

    #[test]
    fn test_serde_as_map_key() {
        let mut map = HashMap::new();
        map.insert(Address::new([3u8; 32]), 42u64);
        let json = serde_json::to_string(&map).unwrap();
        let back: HashMap<Address, u64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_reserve_distinct_from_null() {
        assert_ne!(Address::STAKE_RESERVE, Address::NULL);
    }
}
