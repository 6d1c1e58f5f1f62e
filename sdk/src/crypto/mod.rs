//! # Cryptographic Primitives
//!
//! Hashing and the signer capability. The signing protocol in
//! [`crate::transaction::signing`] depends only on the [`Signer`] trait, so
//! hardware wallets and remote signers plug in without touching the
//! encoder or the value codec.
//!
//! Everything here wraps audited crates (`sha2`, `sha3`, `k256`).

pub mod hash;
pub mod signer;

pub use hash::{sha2_256, sha3_256};
pub use signer::{
    verify_secp256k1, HashAlgorithm, InMemorySigner, SignAlgorithm, Signer, SignerError,
};
