// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Flow SDK — Core Library
//!
//! The client side of a Flow transaction: build it, encode it the way the
//! chain hashes it, collect signatures in the right order, and read back
//! the JSON-Cadence values the chain returns.
//!
//! Nothing in this crate talks to the network. The access node is a trait
//! ([`access::AccessApi`]) that callers implement over their transport of
//! choice; key storage is a trait too ([`crypto::Signer`]).
//!
//! ## Architecture
//!
//! - **rlp** — The canonical length-prefixed encoder (and a strict decoder).
//! - **types** — Fixed-width `Address` (8 bytes) and `Identifier` (32 bytes).
//! - **cadence** — JSON-Cadence values: every value tagged with its type.
//! - **transaction** — The immutable transaction, its three canonical byte
//!   forms, and the payload/envelope signing protocol.
//! - **crypto** — Hashing and the `Signer` capability, with an in-memory
//!   secp256k1 signer.
//! - **access** — The access node interface and seal polling.
//! - **config** — Protocol constants and polling defaults.
//!
//! ## Example
//!
//! ```
//! use flow_sdk::crypto::{HashAlgorithm, InMemorySigner};
//! use flow_sdk::transaction::add_envelope_signature;
//! use flow_sdk::transaction::{ProposalKey, Transaction};
//! use flow_sdk::types::{Address, Identifier};
//!
//! let account = Address::from_hex("f8d6e0586b0a20c7").unwrap();
//! let key = InMemorySigner::generate(HashAlgorithm::Sha3_256);
//!
//! let tx = Transaction::new(
//!     "transaction { prepare(signer: AuthAccount) {} }",
//!     vec![],
//!     Identifier::default(),
//!     9999,
//!     ProposalKey::new(account, 0, 0),
//!     account,
//!     vec![account],
//! );
//! // One account plays every role, so it only signs the envelope.
//! let signed = add_envelope_signature(&tx, account, 0, &key).unwrap();
//! assert_eq!(signed.envelope_signatures().len(), 1);
//! ```

pub mod access;
pub mod cadence;
pub mod config;
pub mod crypto;
pub mod rlp;
pub mod transaction;
pub mod types;
