//! Data returned by an access node.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::cadence::{self, CodecError, Value};
use crate::crypto::{HashAlgorithm, SignAlgorithm};
use crate::rlp::RlpError;
use crate::types::{hex_bytes, Address, Identifier};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AccessError {
    /// The transport failed or the node returned an error.
    #[error("access node error: {0}")]
    Transport(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// The transaction did not reach a terminal status in time.
    #[error("transaction {id} still {last_status} after {waited:?}")]
    Timeout {
        id: Identifier,
        waited: Duration,
        last_status: TransactionStatus,
    },

    #[error("encoding error: {0}")]
    Encoding(#[from] RlpError),

    #[error("undecodable response: {0}")]
    Codec(#[from] CodecError),
}

// ---------------------------------------------------------------------------
// Transaction status
// ---------------------------------------------------------------------------

/// Where a submitted transaction is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TransactionStatus {
    #[default]
    Unknown,
    Pending,
    Finalized,
    Executed,
    Sealed,
    Expired,
}

impl TransactionStatus {
    /// Sealed and expired transactions never change status again.
    pub fn is_terminal(self) -> bool {
        matches!(self, TransactionStatus::Sealed | TransactionStatus::Expired)
    }

    /// Maps the numeric status used by the access API.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => TransactionStatus::Pending,
            2 => TransactionStatus::Finalized,
            3 => TransactionStatus::Executed,
            4 => TransactionStatus::Sealed,
            5 => TransactionStatus::Expired,
            _ => TransactionStatus::Unknown,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionStatus::Unknown => "unknown",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Finalized => "finalized",
            TransactionStatus::Executed => "executed",
            TransactionStatus::Sealed => "sealed",
            TransactionStatus::Expired => "expired",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Results and events
// ---------------------------------------------------------------------------

/// An event emitted while executing a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Fully qualified type, e.g. `A.0ae53cb6e3f42a79.FlowToken.TokensDeposited`.
    pub event_type: String,
    pub transaction_id: Identifier,
    pub transaction_index: u32,
    pub event_index: u32,
    pub payload: Value,
}

impl Event {
    /// Builds an event from the raw JSON-Cadence payload bytes the node
    /// returns.
    pub fn from_payload_bytes(
        event_type: impl Into<String>,
        transaction_id: Identifier,
        transaction_index: u32,
        event_index: u32,
        payload: &[u8],
    ) -> Result<Self, CodecError> {
        Ok(Self {
            event_type: event_type.into(),
            transaction_id,
            transaction_index,
            event_index,
            payload: cadence::decode_slice(payload)?,
        })
    }

    /// Looks up a payload field by name. `None` if the payload is not a
    /// composite or has no such field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.payload.as_composite().and_then(|c| c.get(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TransactionResult {
    pub status: TransactionStatus,
    /// Zero on success.
    pub status_code: u32,
    pub error_message: String,
    pub events: Vec<Event>,
}

impl TransactionResult {
    pub fn is_sealed(&self) -> bool {
        self.status == TransactionStatus::Sealed
    }

    /// True if execution reverted. Only meaningful once executed.
    pub fn failed(&self) -> bool {
        self.status_code != 0 || !self.error_message.is_empty()
    }

    pub fn events_of_type<'a>(&'a self, event_type: &'a str) -> impl Iterator<Item = &'a Event> {
        self.events.iter().filter(move |e| e.event_type == event_type)
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountKey {
    pub index: u32,
    #[serde(with = "hex_bytes")]
    pub public_key: Vec<u8>,
    pub sign_algorithm: SignAlgorithm,
    pub hash_algorithm: HashAlgorithm,
    pub weight: u32,
    pub sequence_number: u64,
    pub revoked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    /// In the smallest token unit (1e-8 FLOW).
    pub balance: u64,
    pub keys: Vec<AccountKey>,
}

impl Account {
    pub fn key(&self, index: u32) -> Option<&AccountKey> {
        self.keys.iter().find(|k| k.index == index)
    }
}
