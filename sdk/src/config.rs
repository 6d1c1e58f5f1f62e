//! # Protocol Configuration & Constants
//!
//! Every fixed width, prefix, and default the SDK relies on lives here.
//! These values mirror what the chain's validating nodes expect; changing
//! one of the widths breaks every canonical byte form downstream.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Fixed-width identifiers
// ---------------------------------------------------------------------------

/// Account addresses are always 8 bytes on the wire.
pub const ADDRESS_LENGTH: usize = 8;

/// Block and transaction identifiers are always 32 bytes.
pub const IDENTIFIER_LENGTH: usize = 32;

/// Prefix used when rendering addresses as text. Input without it is
/// accepted and normalised.
pub const HEX_PREFIX: &str = "0x";

// ---------------------------------------------------------------------------
// Canonical encoding
// ---------------------------------------------------------------------------

/// Largest payload that still uses the short (single tag byte) form.
pub const RLP_SHORT_LIMIT: usize = 55;

/// Tag byte offset for byte strings.
pub const RLP_STRING_OFFSET: u8 = 0x80;

/// Tag byte offset for lists.
pub const RLP_LIST_OFFSET: u8 = 0xc0;

/// The long form spends at most this many bytes on the big-endian length.
pub const RLP_MAX_LENGTH_BYTES: usize = 8;

/// Deepest list nesting the decoder accepts. A payment envelope nests three
/// levels.
pub const RLP_MAX_DEPTH: usize = 32;

// ---------------------------------------------------------------------------
// Fixed-point numbers
// ---------------------------------------------------------------------------

/// Fix64 and UFix64 carry exactly eight decimal places.
pub const FIX64_SCALE: u32 = 8;

/// `10^FIX64_SCALE`, the factor between the text form and the stored integer.
pub const FIX64_FACTOR: u64 = 100_000_000;

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Gas limit assumed when a serialized transaction omits one.
pub const DEFAULT_GAS_LIMIT: u64 = 9_999;

// ---------------------------------------------------------------------------
// Status polling
// ---------------------------------------------------------------------------

/// Default delay between two status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Default deadline for a transaction to reach a terminal status.
/// Sealing usually takes a handful of seconds; a minute is generous.
pub const DEFAULT_SEAL_TIMEOUT: Duration = Duration::from_secs(60);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(ADDRESS_LENGTH, 8);
        assert_eq!(IDENTIFIER_LENGTH, 32);
    }

    #[test]
    fn test_rlp_tag_space_is_disjoint() {
        // Long string tags end at 0xbf, right before the list space.
        assert_eq!(
            RLP_STRING_OFFSET as usize + RLP_SHORT_LIMIT + 1 + RLP_MAX_LENGTH_BYTES,
            RLP_LIST_OFFSET as usize
        );
    }

    #[test]
    fn test_fix64_factor_matches_scale() {
        assert_eq!(10u64.pow(FIX64_SCALE), FIX64_FACTOR);
    }

    #[test]
    fn test_polling_defaults_sanity() {
        assert!(DEFAULT_POLL_INTERVAL < DEFAULT_SEAL_TIMEOUT);
        assert!(DEFAULT_POLL_INTERVAL.as_millis() > 0);
    }
}
