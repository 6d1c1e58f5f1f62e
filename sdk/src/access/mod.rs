//! # Access Node Interface
//!
//! The boundary between the SDK core and the network. [`AccessApi`] is the
//! three calls the core needs from an access node; the SDK ships no
//! transport. Wrap a gRPC or REST client in an `AccessApi` implementation
//! and the helpers here work unchanged.
//!
//! ## Architecture
//!
//! ```text
//! types.rs — TransactionStatus, TransactionResult, Event, Account, AccessError
//! poll.rs  — PollOptions and wait_for_seal
//! ```

pub mod poll;
pub mod types;

pub use poll::{wait_for_seal, PollOptions};
pub use types::{
    AccessError, Account, AccountKey, Event, TransactionResult, TransactionStatus,
};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::transaction::Transaction;
use crate::types::{Address, Identifier};

/// The calls the SDK makes against an access node.
#[async_trait]
pub trait AccessApi: Send + Sync {
    /// Submits a payment envelope and returns the transaction id the node
    /// assigned.
    async fn submit(&self, envelope: &[u8]) -> Result<Identifier, AccessError>;

    async fn get_transaction_result(&self, id: &Identifier)
        -> Result<TransactionResult, AccessError>;

    async fn get_account(&self, address: &Address) -> Result<Account, AccessError>;
}

/// Submits `tx` as its canonical payment envelope.
pub async fn send_transaction<A: AccessApi + ?Sized>(
    api: &A,
    tx: &Transaction,
) -> Result<Identifier, AccessError> {
    let envelope = tx.canonical_payment_envelope()?;
    let local_id = tx.id()?;
    let id = api.submit(&envelope).await?;
    if id != local_id {
        warn!(%id, %local_id, "node returned a different transaction id");
    }
    debug!(%id, bytes = envelope.len(), "transaction submitted");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::ProposalKey;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture {
        submitted: Mutex<Vec<Vec<u8>>>,
    }

    #[async_trait]
    impl AccessApi for Capture {
        async fn submit(&self, envelope: &[u8]) -> Result<Identifier, AccessError> {
            self.submitted
                .lock()
                .map_err(|_| AccessError::Transport("poisoned".into()))?
                .push(envelope.to_vec());
            Ok(Identifier::from_array(crate::crypto::sha3_256(envelope)))
        }

        async fn get_transaction_result(
            &self,
            _id: &Identifier,
        ) -> Result<TransactionResult, AccessError> {
            Ok(TransactionResult::default())
        }

        async fn get_account(&self, address: &Address) -> Result<Account, AccessError> {
            Err(AccessError::NotFound(address.to_string()))
        }
    }

    #[tokio::test]
    async fn sends_the_payment_envelope() {
        let payer = Address::from_hex("01").unwrap();
        let tx = Transaction::new(
            "transaction {}",
            vec![],
            Identifier::default(),
            10,
            ProposalKey::new(payer, 0, 0),
            payer,
            vec![payer],
        );
        let api = Capture::default();
        let id = send_transaction(&api, &tx).await.unwrap();

        assert_eq!(id, tx.id().unwrap());
        let submitted = api.submitted.lock().unwrap();
        assert_eq!(submitted.as_slice(), &[tx.canonical_payment_envelope().unwrap()]);
    }

    #[tokio::test]
    async fn works_through_a_trait_object() {
        let api: Box<dyn AccessApi> = Box::new(Capture::default());
        let err = api
            .get_account(&Address::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::NotFound(_)));
    }
}
