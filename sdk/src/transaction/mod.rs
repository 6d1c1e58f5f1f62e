//! # Transaction Module
//!
//! The transaction value, its three canonical byte forms, and the protocol
//! for attaching signatures to it.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        — Argument, ProposalKey, TransactionSignature
//! model.rs        — Transaction, canonical forms, transaction id, envelope decoding
//! signing.rs      — signer list positions and the payload/envelope signing steps
//! verification.rs — structural checks before submission
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — [`Transaction::new`] with the payload fields.
//! 2. **Sign the payload** — [`add_payload_signature`] for the proposer and
//!    each authorizer. They sign [`Transaction::canonical_payload`].
//! 3. **Sign the envelope** — [`add_envelope_signature`] for the payer, who
//!    signs [`Transaction::canonical_authorization_envelope`].
//! 4. **Validate** — [`validate_for_submission`] catches local mistakes.
//! 5. **Submit** — hand [`Transaction::canonical_payment_envelope`] to an
//!    access node (see [`crate::access::send_transaction`]).
//!
//! ## Design Decisions
//!
//! - Every signing step returns a new [`Transaction`]. Nothing is shared and
//!   mutated, so partially signed transactions can be passed between
//!   threads or processes without locking.
//! - A signature's `signer_index` is its address's position in
//!   [`Transaction::signer_list`]: proposer, authorizers, payer, with
//!   repeats dropped. Only the index goes on the wire.
//! - Arguments are opaque bytes. The model never re-encodes them, so the
//!   payload a caller signs is exactly the payload the node hashes.

pub mod model;
pub mod signing;
pub mod types;
pub mod verification;

pub use model::{Transaction, TransactionError};
pub use signing::{add_envelope_signature, add_payload_signature, SigningError};
pub use types::{Argument, ProposalKey, TransactionSignature};
pub use verification::validate_for_submission;
