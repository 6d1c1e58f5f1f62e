//! Structural checks before a transaction is submitted.
//!
//! The access node rejects malformed transactions anyway, but a round trip
//! to find out a signature is missing is slow and the node's error messages
//! are terse. [`validate_for_submission`] catches the usual mistakes locally.
//! It does not verify signatures cryptographically: that needs the accounts'
//! public keys, which only the chain knows.

use super::model::{Transaction, TransactionError};
use super::types::TransactionSignature;

/// Checks a fully signed transaction.
///
/// The checks, in order:
///
/// 1. **Script** — must not be empty.
/// 2. **Gas limit** — must be > 0.
/// 3. **Payload signatures** — each comes from the proposer or an
///    authorizer and carries that signer's position in the signer list.
/// 4. **Envelope signatures** — each comes from the payer, with the payer's
///    position.
/// 5. **Payer signed** — at least one envelope signature is present.
///
/// # Errors
///
/// Returns the first failing check.
pub fn validate_for_submission(tx: &Transaction) -> Result<(), TransactionError> {
    // 1. Script.
    if tx.script().trim().is_empty() {
        return Err(TransactionError::EmptyScript);
    }

    // 2. Gas limit.
    if tx.gas_limit() == 0 {
        return Err(TransactionError::ZeroGasLimit);
    }

    // 3. Payload signatures.
    for sig in tx.payload_signatures() {
        if !tx.is_payload_signer(sig.address) {
            return Err(TransactionError::PayloadSignerNotRequired {
                address: sig.address,
            });
        }
        let expected = tx
            .signer_index(sig.address)
            .ok_or(TransactionError::PayloadSignerNotRequired {
                address: sig.address,
            })?;
        check_index(sig, expected)?;
    }

    // 4. Envelope signatures.
    for sig in tx.envelope_signatures() {
        if sig.address != tx.payer() {
            return Err(TransactionError::EnvelopeSignerNotPayer {
                address: sig.address,
            });
        }
        let expected = tx
            .signer_index(sig.address)
            .ok_or(TransactionError::EnvelopeSignerNotPayer {
                address: sig.address,
            })?;
        check_index(sig, expected)?;
    }

    // 5. Payer signed.
    if tx.envelope_signatures().is_empty() {
        return Err(TransactionError::MissingEnvelopeSignature);
    }

    Ok(())
}

fn check_index(sig: &TransactionSignature, expected: u32) -> Result<(), TransactionError> {
    if sig.signer_index != expected {
        return Err(TransactionError::SignerIndexMismatch {
            address: sig.address,
            expected,
            actual: sig.signer_index,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
