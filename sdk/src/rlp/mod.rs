//! # Canonical Encoder
//!
//! Recursive length-prefix encoding of byte strings and lists. Validating
//! nodes decode this format strictly, so every rule here (the single-byte
//! shortcut, the 55-byte boundary, minimal integers) must be matched
//! exactly.
//!
//! ## Architecture
//!
//! ```text
//! mod.rs     — RlpItem, the input/output tree, and RlpError
//! encode.rs  — RlpItem -> bytes
//! decode.rs  — bytes -> RlpItem, rejecting non-canonical input
//! ```
//!
//! The module knows nothing about transactions. Callers build an
//! [`RlpItem`] tree and hand it to [`encode`].

pub mod decode;
pub mod encode;

pub use decode::decode;
pub use encode::encode;

use thiserror::Error;

/// Errors raised while encoding or decoding canonical bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RlpError {
    /// A length needs more than eight big-endian bytes.
    #[error("encoding overflow: length {length} is not representable")]
    EncodingOverflow { length: u128 },

    /// Input ended before the announced payload did.
    #[error("unexpected end of input: needed {needed} more bytes")]
    UnexpectedEnd { needed: usize },

    /// Bytes were left over after the top-level item.
    #[error("{count} trailing bytes after canonical item")]
    TrailingBytes { count: usize },

    /// The input was decodable but not in canonical form.
    #[error("non-canonical encoding: {0}")]
    NonCanonical(&'static str),

    /// Lists are nested deeper than the decoder allows.
    #[error("lists nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    /// A list was found where a byte string was expected.
    #[error("expected a byte string, found a list")]
    ExpectedBytes,

    /// A byte string was found where a list was expected.
    #[error("expected a list, found a byte string")]
    ExpectedList,

    /// An integer had leading zeros or does not fit in 64 bits.
    #[error("invalid integer: {0}")]
    InvalidInteger(&'static str),
}

/// A node in the canonical encoding tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// A raw byte string, encoded as-is (fixed-width values keep their zeros).
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        RlpItem::Bytes(data.into())
    }

    /// A non-negative integer as its minimal big-endian byte string.
    /// Zero becomes the empty string.
    pub fn uint(value: u64) -> Self {
        let be = value.to_be_bytes();
        let leading = be.iter().take_while(|&&b| b == 0).count();
        RlpItem::Bytes(be[leading..].to_vec())
    }

    pub fn list(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }

    /// Borrows the byte string, or fails if this is a list.
    pub fn as_bytes(&self) -> Result<&[u8], RlpError> {
        match self {
            RlpItem::Bytes(b) => Ok(b),
            RlpItem::List(_) => Err(RlpError::ExpectedBytes),
        }
    }

    /// Borrows the list items, or fails if this is a byte string.
    pub fn as_list(&self) -> Result<&[RlpItem], RlpError> {
        match self {
            RlpItem::List(items) => Ok(items),
            RlpItem::Bytes(_) => Err(RlpError::ExpectedList),
        }
    }

    /// Reads a minimal big-endian integer back out.
    pub fn to_u64(&self) -> Result<u64, RlpError> {
        let bytes = self.as_bytes()?;
        if bytes.len() > 8 {
            return Err(RlpError::InvalidInteger("wider than 64 bits"));
        }
        if bytes.first() == Some(&0) {
            return Err(RlpError::InvalidInteger("leading zero byte"));
        }
        Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
    }
}
