//! Value types carried inside a [`super::Transaction`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::model::TransactionError;
use crate::access::Account;
use crate::cadence::{self, CodecError, Value};
use crate::rlp::RlpItem;
use crate::types::{hex_bytes, Address};

// ---------------------------------------------------------------------------
// Argument
// ---------------------------------------------------------------------------

/// One script argument: the JSON-Cadence bytes exactly as they will be
/// placed in the payload.
///
/// The bytes are opaque to the transaction model. Two arguments that decode
/// to the same [`Value`] but differ in whitespace are different arguments
/// and produce different payloads.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Argument(#[serde(with = "hex_bytes")] Vec<u8>);

impl Argument {
    /// Wraps already-encoded bytes without inspecting them.
    pub fn new(encoded: impl Into<Vec<u8>>) -> Self {
        Self(encoded.into())
    }

    /// Encodes `value` with the value codec.
    pub fn from_value(value: &Value) -> Result<Self, CodecError> {
        cadence::encode_to_vec(value).map(Self)
    }

    /// Decodes the bytes back into a value.
    pub fn to_value(&self) -> Result<Value, CodecError> {
        cadence::decode_slice(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argument({})", String::from_utf8_lossy(&self.0))
    }
}

// ---------------------------------------------------------------------------
// ProposalKey
// ---------------------------------------------------------------------------

/// The account key that proposes the transaction and the sequence number
/// it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalKey {
    pub address: Address,
    pub key_index: u32,
    pub sequence_number: u64,
}

impl ProposalKey {
    pub fn new(address: Address, key_index: u32, sequence_number: u64) -> Self {
        Self {
            address,
            key_index,
            sequence_number,
        }
    }

    /// Uses the current sequence number of key `key_index` on `account`.
    ///
    /// Fails if the account has no such key or the key is revoked.
    pub fn from_account(account: &Account, key_index: u32) -> Result<Self, TransactionError> {
        let key = account
            .key(key_index)
            .filter(|k| !k.revoked)
            .ok_or(TransactionError::UnknownProposalKey {
                address: account.address,
                key_index,
            })?;
        Ok(Self::new(account.address, key.index, key.sequence_number))
    }
}

// ---------------------------------------------------------------------------
// TransactionSignature
// ---------------------------------------------------------------------------

/// A signature attached to a transaction.
///
/// `signer_index` is the position of `address` in the signer list at the
/// time of signing. Only `signer_index`, `key_index` and `signature` go on
/// the wire; `address` is kept for callers and validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionSignature {
    pub address: Address,
    pub signer_index: u32,
    pub key_index: u32,
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
}

impl TransactionSignature {
    pub fn new(address: Address, signer_index: u32, key_index: u32, signature: Vec<u8>) -> Self {
        Self {
            address,
            signer_index,
            key_index,
            signature,
        }
    }

    /// `[signerIndex, keyIndex, signature]`
    pub(crate) fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(u64::from(self.signer_index)),
            RlpItem::uint(u64::from(self.key_index)),
            RlpItem::bytes(self.signature.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{Account, AccountKey};
    use crate::cadence::Number;
    use crate::crypto::{HashAlgorithm, SignAlgorithm};

    fn account() -> Account {
        let key = |index, sequence_number, revoked| AccountKey {
            index,
            public_key: vec![0xab; 64],
            sign_algorithm: SignAlgorithm::EcdsaSecp256k1,
            hash_algorithm: HashAlgorithm::Sha3_256,
            weight: 1000,
            sequence_number,
            revoked,
        };
        Account {
            address: Address::from_hex("01").unwrap(),
            balance: 0,
            keys: vec![key(0, 12, false), key(1, 3, true)],
        }
    }

    #[test]
    fn argument_round_trips_through_the_codec() {
        let value = Value::Number(Number::UFix64(150_000_000));
        let arg = Argument::from_value(&value).unwrap();
        assert_eq!(
            arg.as_bytes(),
            br#"{"type":"UFix64","value":"1.50000000"}"#.as_slice()
        );
        assert_eq!(arg.to_value().unwrap(), value);
    }

    #[test]
    fn argument_bytes_are_opaque() {
        let spaced = Argument::new(br#"{ "type": "Bool", "value": true }"#.to_vec());
        let tight = Argument::from_value(&Value::Bool(true)).unwrap();
        assert_ne!(spaced, tight);
        assert_eq!(spaced.to_value().unwrap(), tight.to_value().unwrap());
    }

    #[test]
    fn argument_serializes_as_hex() {
        let arg = Argument::new(vec![0x01, 0xff]);
        assert_eq!(serde_json::to_string(&arg).unwrap(), "\"01ff\"");
        let back: Argument = serde_json::from_str("\"0x01ff\"").unwrap();
        assert_eq!(back, arg);
    }

    #[test]
    fn proposal_key_reads_sequence_number() {
        let key = ProposalKey::from_account(&account(), 0).unwrap();
        assert_eq!(key.sequence_number, 12);
        assert_eq!(key.key_index, 0);
        assert_eq!(key.address, account().address);
    }

    #[test]
    fn proposal_key_rejects_revoked_and_missing_keys() {
        assert!(matches!(
            ProposalKey::from_account(&account(), 1),
            Err(TransactionError::UnknownProposalKey { key_index: 1, .. })
        ));
        assert!(ProposalKey::from_account(&account(), 7).is_err());
    }

    #[test]
    fn signature_tuple_shape() {
        let sig = TransactionSignature::new(Address::default(), 0, 2, vec![7, 7]);
        assert_eq!(
            sig.to_rlp(),
            RlpItem::list(vec![
                RlpItem::bytes(vec![]),
                RlpItem::bytes(vec![2]),
                RlpItem::bytes(vec![7, 7]),
            ])
        );
    }
}
