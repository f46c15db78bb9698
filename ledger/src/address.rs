//! # Account Addresses
//!
//! A ledger account is identified by a 20-byte [`Address`]. The ledger does
//! not derive addresses from key material — authentication happens in the
//! external submission layer, and the core only ever sees the already
//! authenticated caller identity.
//!
//! Addresses serialize as `0x`-prefixed hex strings so that address-keyed
//! maps come out as ordinary JSON objects instead of arrays of byte arrays.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Number of bytes in an account address.
pub const ADDRESS_LENGTH: usize = 20;

/// A 20-byte account identifier.
///
/// The all-zero address is a sentinel: it is never a valid transfer
/// recipient (see [`Address::is_zero`]) and exists so that external callers
/// have a canonical "nobody" value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

/// Errors from parsing an address out of its hex form.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AddressParseError {
    /// The input was not valid hex.
    #[error("invalid hex in address: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The decoded byte string was not exactly 20 bytes.
    #[error("invalid address length: expected {ADDRESS_LENGTH} bytes, got {0}")]
    InvalidLength(usize),
}

impl Address {
    /// The zero sentinel address.
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    /// Creates an address from raw bytes.
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 20-byte identifier.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Returns `true` if this is the zero sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LENGTH]
    }

    /// Returns the `0x`-prefixed lowercase hex form.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parses an address from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, AddressParseError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)?;
        if bytes.len() != ADDRESS_LENGTH {
            return Err(AddressParseError::InvalidLength(bytes.len()));
        }
        let mut arr = [0u8; ADDRESS_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({}...)", &self.to_hex()[..10])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Serde as hex strings rather than byte arrays, so `HashMap<Address, _>`
// serializes to a JSON object.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; ADDRESS_LENGTH])
    }

    #[test]
    fn hex_roundtrip() {
        let a = addr(0xAB);
        let parsed = Address::from_hex(&a.to_hex()).unwrap();
        assert_eq!(a, parsed);
    }

    #[test]
    fn parses_without_prefix() {
        let a = addr(0x11);
        let bare = hex::encode(a.as_bytes());
        assert_eq!(Address::from_hex(&bare).unwrap(), a);
    }

    #[test]
    fn wrong_length_rejected() {
        let result = Address::from_hex("0xdeadbeef");
        assert_eq!(result.unwrap_err(), AddressParseError::InvalidLength(4));
    }

    #[test]
    fn bad_hex_rejected() {
        assert!(Address::from_hex("0xzz").is_err());
    }

    #[test]
    fn zero_sentinel() {
        assert!(Address::ZERO.is_zero());
        assert!(!addr(0x01).is_zero());
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&addr(0x01)).unwrap();
        assert_eq!(json, format!("\"{}\"", addr(0x01).to_hex()));
    }

    #[test]
    fn map_keys_serialize_as_json_object() {
        let mut balances: HashMap<Address, u128> = HashMap::new();
        balances.insert(addr(0x02), 42);

        let json = serde_json::to_string(&balances).unwrap();
        let recovered: HashMap<Address, u128> = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.get(&addr(0x02)), Some(&42));
    }
}
