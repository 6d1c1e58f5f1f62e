//! Error types for the JSON-Cadence codec.

use thiserror::Error;

use crate::types::FixedWidthError;

/// Errors raised while decoding (or serialising) JSON-Cadence values.
///
/// Decoding is all-or-nothing: when a nested value fails, the error
/// propagates out and no partially built container is returned.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The `type` tag is not one of the known constants.
    #[error("unknown value type: {0:?}")]
    UnknownValueType(String),

    /// A required key is absent from a value object.
    #[error("missing field {0:?}")]
    MissingField(&'static str),

    /// A key is present but holds the wrong JSON shape.
    #[error("field {field:?} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// Number text that does not parse, or does not fit the declared width.
    #[error("invalid {tag} literal {text:?}: {reason}")]
    InvalidNumber {
        tag: &'static str,
        text: String,
        reason: &'static str,
    },

    /// An address literal that is not 8 bytes of hex.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] FixedWidthError),

    /// The input was not valid JSON at all.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
