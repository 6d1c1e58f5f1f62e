//! Fixed-width byte identifiers shared by every layer of the SDK.
//!
//! [`Address`] (8 bytes) names an account; [`Identifier`] (32 bytes) names a
//! block or a transaction. Both are normalised to their exact width at
//! construction: shorter input is left-padded with zero bytes, longer input
//! is rejected. No truncation ever happens.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ADDRESS_LENGTH, HEX_PREFIX, IDENTIFIER_LENGTH};

/// Errors constructing a fixed-width value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixedWidthError {
    /// The input is wider than the declared width.
    #[error("malformed fixed-width value: expected at most {expected} bytes, got {actual}")]
    Malformed { expected: usize, actual: usize },

    /// The text form is not hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Copies `bytes` into the low end of an `N`-byte array.
fn left_pad<const N: usize>(bytes: &[u8]) -> Result<[u8; N], FixedWidthError> {
    if bytes.len() > N {
        return Err(FixedWidthError::Malformed {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out[N - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

/// Parses hex with or without the `0x` prefix. An odd nibble count is
/// treated as having an implicit leading zero. At least one digit is
/// required.
fn parse_hex<const N: usize>(text: &str) -> Result<[u8; N], FixedWidthError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix(HEX_PREFIX)
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(FixedWidthError::InvalidHex(format!("{text:?}: no hex digits")));
    }
    let padded = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    let bytes = hex::decode(&padded)
        .map_err(|e| FixedWidthError::InvalidHex(format!("{text:?}: {e}")))?;
    left_pad(&bytes)
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// An 8-byte account address.
///
/// Renders as `0x` followed by sixteen lowercase hex digits.
///
/// ```
/// use flow_sdk::types::Address;
///
/// let a = Address::from_hex("f8d6e0586b0a20c7").unwrap();
/// let b: Address = "0xf8d6e0586b0a20c7".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "0xf8d6e0586b0a20c7");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Builds an address from raw bytes, left-padding short input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FixedWidthError> {
        left_pad(bytes).map(Self)
    }

    /// Builds an address from hex text, with or without the `0x` prefix.
    pub fn from_hex(text: &str) -> Result<Self, FixedWidthError> {
        parse_hex(text).map(Self)
    }

    pub const fn from_array(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Lowercase hex without the prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", HEX_PREFIX, self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = FixedWidthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// A 32-byte block or transaction identifier. Renders as plain lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identifier([u8; IDENTIFIER_LENGTH]);

impl Identifier {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FixedWidthError> {
        left_pad(bytes).map(Self)
    }

    pub fn from_hex(text: &str) -> Result<Self, FixedWidthError> {
        parse_hex(text).map(Self)
    }

    pub const fn from_array(bytes: [u8; IDENTIFIER_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; IDENTIFIER_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({self})")
    }
}

impl FromStr for Identifier {
    type Err = FixedWidthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Hex byte fields
// ---------------------------------------------------------------------------

/// `#[serde(with = "hex_bytes")]` for `Vec<u8>` fields stored as hex text.
pub(crate) mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        let digits = text.strip_prefix("0x").unwrap_or(&text);
        hex::decode(digits).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bytes_are_left_padded() {
        let from_bytes = Address::from_bytes(&[4, 5, 4, 5, 4, 5]).unwrap();
        let from_hex = Address::from_hex("0000040504050405").unwrap();
        assert_eq!(from_bytes, from_hex);
        assert_eq!(from_bytes.as_bytes(), &[0, 0, 4, 5, 4, 5, 4, 5]);
    }

    #[test]
    fn prefix_is_optional() {
        let with = Address::from_hex("0xf8d6e0586b0a20c7").unwrap();
        let without = Address::from_hex("f8d6e0586b0a20c7").unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn empty_hex_is_rejected() {
        for text in ["", "0x", "0X", "  "] {
            assert!(
                matches!(Address::from_hex(text), Err(FixedWidthError::InvalidHex(_))),
                "{text:?} should fail"
            );
        }
        assert!(Identifier::from_hex("0x").is_err());
        assert!(serde_json::from_str::<Address>("\"\"").is_err());
        assert_eq!(Address::from_hex("0x0").unwrap(), Address::default());
    }

    #[test]
    fn odd_length_hex_is_accepted() {
        let a = Address::from_hex("0x1").unwrap();
        assert_eq!(a.as_bytes(), &[0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn oversized_input_is_rejected() {
        assert_eq!(
            Address::from_bytes(&[1u8; 9]),
            Err(FixedWidthError::Malformed {
                expected: 8,
                actual: 9
            })
        );
        assert!(matches!(
            Identifier::from_hex(&"ab".repeat(33)),
            Err(FixedWidthError::Malformed { .. })
        ));
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(matches!(
            Address::from_hex("0xzz"),
            Err(FixedWidthError::InvalidHex(_))
        ));
    }

    #[test]
    fn display_forms() {
        let a = Address::from_bytes(&[1]).unwrap();
        assert_eq!(a.to_string(), "0x0000000000000001");

        let id = Identifier::from_bytes(&[3, 3, 3, 6, 6, 6]).unwrap();
        assert_eq!(id.to_string().len(), 64);
        assert!(id.to_string().ends_with("030303060606"));
    }

    #[test]
    fn serde_uses_hex_text() {
        let a = Address::from_hex("f8d6e0586b0a20c7").unwrap();
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "\"0xf8d6e0586b0a20c7\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);

        let id = Identifier::from_bytes(&[7]).unwrap();
        let back: Identifier = serde_json::from_str(&serde_json::to_string(&id).unwrap()).unwrap();
        assert_eq!(id, back);
    }
}
