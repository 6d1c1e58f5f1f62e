//! # Hashing Utilities
//!
//! The two digests account keys can be registered with:
//!
//! - **SHA2-256** via the `sha2` crate.
//! - **SHA3-256** via the `sha3` crate. Also used for transaction ids.
//!
//! Both return fixed 32-byte arrays; callers that need a `Vec` can call
//! `.to_vec()` themselves.

use sha2::{Digest, Sha256};
use sha3::Sha3_256;

/// Compute the SHA2-256 digest of `data`.
///
/// # Example
///
/// ```
/// use flow_sdk::crypto::hash::sha2_256;
///
/// let digest = sha2_256(b"abc");
/// assert_eq!(digest[0], 0xba);
/// ```
pub fn sha2_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the SHA3-256 digest of `data`.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}
