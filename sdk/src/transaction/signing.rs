//! Attaching signatures to a transaction.
//!
//! Signing is a separate step from construction because the keys may not
//! be available when the transaction is built (hardware wallet, remote
//! signer, a co-signer on another machine). Each call takes a transaction
//! by reference and returns a new one; on error nothing is produced and the
//! input is unchanged.
//!
//! # Ordering
//!
//! Payload signers (proposer and authorizers) sign the canonical payload.
//! The payer signs the authorization envelope, which includes every payload
//! signature collected so far. Collect all payload signatures first: a
//! payload signature added after the payer has signed invalidates the
//! payer's signature.

use thiserror::Error;
use tracing::debug;

use super::model::Transaction;
use super::types::TransactionSignature;
use crate::crypto::{Signer, SignerError};
use crate::rlp::RlpError;
use crate::types::Address;

/// Errors raised while adding a signature.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The address is not in the signer list, or it is a payload signature
    /// from an address that is neither the proposer nor an authorizer.
    #[error("{address} is not a required signer of this transaction")]
    SignerNotRequired { address: Address },

    /// Only the payer signs the envelope.
    #[error("{address} is not the payer of this transaction")]
    NotPayer { address: Address },

    #[error("signer failed: {0}")]
    Signer(#[from] SignerError),

    #[error("encoding failed: {0}")]
    Encoding(#[from] RlpError),
}

/// Signs the canonical payload as `address` and appends the signature to
/// the payload signatures.
///
/// `address` must be the proposer or an authorizer. Signing twice with the
/// same address and key appends two entries.
pub fn add_payload_signature<S: Signer + ?Sized>(
    tx: &Transaction,
    address: Address,
    key_index: u32,
    signer: &S,
) -> Result<Transaction, SigningError> {
    if !tx.is_payload_signer(address) {
        return Err(SigningError::SignerNotRequired { address });
    }
    let signer_index = tx
        .signer_index(address)
        .ok_or(SigningError::SignerNotRequired { address })?;

    let message = tx.canonical_payload()?;
    let signature = signer.sign(&message)?;

    debug!(
        %address,
        signer_index,
        key_index,
        hash = %signer.hash_algorithm(),
        "payload signed"
    );

    Ok(tx.with_payload_signature(TransactionSignature::new(
        address,
        signer_index,
        key_index,
        signature,
    )))
}

/// Signs the authorization envelope as the payer and appends the signature
/// to the envelope signatures.
pub fn add_envelope_signature<S: Signer + ?Sized>(
    tx: &Transaction,
    address: Address,
    key_index: u32,
    signer: &S,
) -> Result<Transaction, SigningError> {
    if address != tx.payer() {
        return Err(SigningError::NotPayer { address });
    }
    // The payer is always in the signer list.
    let signer_index = tx
        .signer_index(address)
        .ok_or(SigningError::SignerNotRequired { address })?;

    let message = tx.canonical_authorization_envelope()?;
    let signature = signer.sign(&message)?;

    debug!(
        %address,
        signer_index,
        key_index,
        payload_signatures = tx.payload_signatures().len(),
        "envelope signed"
    );

    Ok(tx.with_envelope_signature(TransactionSignature::new(
        address,
        signer_index,
        key_index,
        signature,
    )))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
