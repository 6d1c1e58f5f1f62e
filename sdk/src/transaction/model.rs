//! The immutable transaction value and its canonical byte forms.
//!
//! A [`Transaction`] is built once with its payload fields and empty
//! signature lists. Adding a signature never mutates it: the `with_*`
//! methods return a new value, so a transaction can be shared freely across
//! threads while signers work on copies.
//!
//! # Canonical Byte Forms
//!
//! ```text
//! payload                = [script, [args], refBlockId, gasLimit,
//!                           proposerAddr, proposerKeyIndex, sequenceNumber,
//!                           payer, [authorizers]]
//! authorization envelope = [payload, [[signerIndex, keyIndex, sig], ...]]
//! payment envelope       = [payload, [payload sigs], [envelope sigs]]
//! ```
//!
//! The payload is nested as a list, not as its encoded bytes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{Argument, ProposalKey, TransactionSignature};
use crate::config::{ADDRESS_LENGTH, DEFAULT_GAS_LIMIT, IDENTIFIER_LENGTH};
use crate::crypto::hash::sha3_256;
use crate::rlp::{self, RlpError, RlpItem};
use crate::types::{Address, Identifier};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised by the transaction model: decoding an envelope, looking up
/// a proposal key, or pre-submission validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("encoding error: {0}")]
    Encoding(#[from] RlpError),

    /// An envelope decoded, but a field has the wrong shape.
    #[error("malformed {field}: {reason}")]
    Malformed {
        field: &'static str,
        reason: &'static str,
    },

    /// A signature points past the end of the signer list.
    #[error("signer index {index} out of range for {signers} signers")]
    SignerIndexOutOfRange { index: u64, signers: usize },

    #[error("account {address} has no usable key {key_index}")]
    UnknownProposalKey { address: Address, key_index: u32 },

    #[error("script is empty")]
    EmptyScript,

    #[error("gas limit is zero")]
    ZeroGasLimit,

    #[error("{address} signed the payload but is not a required signer")]
    PayloadSignerNotRequired { address: Address },

    #[error("{address} signed the envelope but is not the payer")]
    EnvelopeSignerNotPayer { address: Address },

    #[error("signature by {address} has signer index {actual}, expected {expected}")]
    SignerIndexMismatch {
        address: Address,
        expected: u32,
        actual: u32,
    },

    #[error("no envelope signature from the payer")]
    MissingEnvelopeSignature,
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A transaction in any state of signing.
///
/// Fields are private: the payload is fixed at construction and signatures
/// are only ever appended through [`Transaction::with_payload_signature`] and
/// [`Transaction::with_envelope_signature`] (or the checked variants in
/// [`super::signing`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    script: String,
    arguments: Vec<Argument>,
    reference_block_id: Identifier,
    #[serde(default = "default_gas_limit")]
    gas_limit: u64,
    proposal_key: ProposalKey,
    payer: Address,
    authorizers: Vec<Address>,
    #[serde(default)]
    payload_signatures: Vec<TransactionSignature>,
    #[serde(default)]
    envelope_signatures: Vec<TransactionSignature>,
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

impl Transaction {
    /// An unsigned transaction. Duplicate authorizers are kept as given.
    pub fn new(
        script: impl Into<String>,
        arguments: Vec<Argument>,
        reference_block_id: Identifier,
        gas_limit: u64,
        proposal_key: ProposalKey,
        payer: Address,
        authorizers: Vec<Address>,
    ) -> Self {
        Self {
            script: script.into(),
            arguments,
            reference_block_id,
            gas_limit,
            proposal_key,
            payer,
            authorizers,
            payload_signatures: Vec::new(),
            envelope_signatures: Vec::new(),
        }
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn reference_block_id(&self) -> Identifier {
        self.reference_block_id
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn proposal_key(&self) -> &ProposalKey {
        &self.proposal_key
    }

    pub fn payer(&self) -> Address {
        self.payer
    }

    pub fn authorizers(&self) -> &[Address] {
        &self.authorizers
    }

    pub fn payload_signatures(&self) -> &[TransactionSignature] {
        &self.payload_signatures
    }

    pub fn envelope_signatures(&self) -> &[TransactionSignature] {
        &self.envelope_signatures
    }

    // -----------------------------------------------------------------------
    // Signer list
    // -----------------------------------------------------------------------

    /// Proposer, then authorizers in order, then payer. Each address appears
    /// once, at its first position.
    ///
    /// ```
    /// use flow_sdk::transaction::{ProposalKey, Transaction};
    /// use flow_sdk::types::{Address, Identifier};
    ///
    /// let p = Address::from_hex("01").unwrap();
    /// let a = Address::from_hex("02").unwrap();
    /// let b = Address::from_hex("03").unwrap();
    /// let tx = Transaction::new(
    ///     "transaction {}",
    ///     vec![],
    ///     Identifier::default(),
    ///     100,
    ///     ProposalKey::new(p, 0, 0),
    ///     p,
    ///     vec![a, b, a],
    /// );
    /// assert_eq!(tx.signer_list(), vec![p, a, b]);
    /// ```
    pub fn signer_list(&self) -> Vec<Address> {
        let candidates = std::iter::once(self.proposal_key.address)
            .chain(self.authorizers.iter().copied())
            .chain(std::iter::once(self.payer));

        let mut signers: Vec<Address> = Vec::with_capacity(self.authorizers.len() + 2);
        for address in candidates {
            if !signers.contains(&address) {
                signers.push(address);
            }
        }
        signers
    }

    /// Position of `address` in the signer list.
    pub fn signer_index(&self, address: Address) -> Option<u32> {
        self.signer_list()
            .iter()
            .position(|a| *a == address)
            .and_then(|i| u32::try_from(i).ok())
    }

    /// `true` if `address` is the proposer or an authorizer. A payer with
    /// neither role only signs the envelope.
    pub fn is_payload_signer(&self, address: Address) -> bool {
        address == self.proposal_key.address || self.authorizers.contains(&address)
    }

    // -----------------------------------------------------------------------
    // Copy-with
    // -----------------------------------------------------------------------

    /// A copy with `signature` appended to the payload signatures.
    ///
    /// No checks are made; see [`super::signing::add_payload_signature`] for
    /// the checked path that also computes the signer index.
    pub fn with_payload_signature(&self, signature: TransactionSignature) -> Transaction {
        let mut next = self.clone();
        next.payload_signatures.push(signature);
        next
    }

    /// A copy with `signature` appended to the envelope signatures.
    pub fn with_envelope_signature(&self, signature: TransactionSignature) -> Transaction {
        let mut next = self.clone();
        next.envelope_signatures.push(signature);
        next
    }

    // -----------------------------------------------------------------------
    // Canonical forms
    // -----------------------------------------------------------------------

    pub(crate) fn payload_item(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::bytes(self.script.as_bytes()),
            RlpItem::list(
                self.arguments
                    .iter()
                    .map(|arg| RlpItem::bytes(arg.as_bytes()))
                    .collect(),
            ),
            RlpItem::bytes(self.reference_block_id.as_bytes().as_slice()),
            RlpItem::uint(self.gas_limit),
            RlpItem::bytes(self.proposal_key.address.as_bytes().as_slice()),
            RlpItem::uint(u64::from(self.proposal_key.key_index)),
            RlpItem::uint(self.proposal_key.sequence_number),
            RlpItem::bytes(self.payer.as_bytes().as_slice()),
            RlpItem::list(
                self.authorizers
                    .iter()
                    .map(|a| RlpItem::bytes(a.as_bytes().as_slice()))
                    .collect(),
            ),
        ])
    }

    fn signature_list(signatures: &[TransactionSignature]) -> RlpItem {
        RlpItem::list(signatures.iter().map(TransactionSignature::to_rlp).collect())
    }

    /// The message payload signers sign. Independent of every signature.
    pub fn canonical_payload(&self) -> Result<Vec<u8>, RlpError> {
        rlp::encode(&self.payload_item())
    }

    /// The message the payer signs: the payload plus all payload signatures.
    pub fn canonical_authorization_envelope(&self) -> Result<Vec<u8>, RlpError> {
        rlp::encode(&RlpItem::list(vec![
            self.payload_item(),
            Self::signature_list(&self.payload_signatures),
        ]))
    }

    /// The bytes submitted to the network.
    pub fn canonical_payment_envelope(&self) -> Result<Vec<u8>, RlpError> {
        rlp::encode(&RlpItem::list(vec![
            self.payload_item(),
            Self::signature_list(&self.payload_signatures),
            Self::signature_list(&self.envelope_signatures),
        ]))
    }

    /// The transaction id: SHA3-256 of the payment envelope.
    pub fn id(&self) -> Result<Identifier, RlpError> {
        let envelope = self.canonical_payment_envelope()?;
        Ok(Identifier::from_array(sha3_256(&envelope)))
    }

    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    /// Parses a payment envelope.
    ///
    /// The encoding must be canonical and every fixed-width field must have
    /// its exact width. Signature addresses are resolved through the signer
    /// list of the decoded payload.
    pub fn from_payment_envelope(bytes: &[u8]) -> Result<Self, TransactionError> {
        let root = rlp::decode(bytes)?;
        let [payload, payload_sigs, envelope_sigs] = expect_list::<3>(&root, "payment envelope")?;

        let [script, arguments, reference_block_id, gas_limit, proposer, key_index, sequence_number, payer, authorizers] =
            expect_list::<9>(payload, "payload")?;

        let script = String::from_utf8(script.as_bytes()?.to_vec()).map_err(|_| {
            TransactionError::Malformed {
                field: "script",
                reason: "not UTF-8",
            }
        })?;
        let arguments = arguments
            .as_list()?
            .iter()
            .map(|arg| arg.as_bytes().map(Argument::new))
            .collect::<Result<Vec<_>, _>>()?;
        let authorizers = authorizers
            .as_list()?
            .iter()
            .map(|a| address(a, "authorizer"))
            .collect::<Result<Vec<_>, _>>()?;

        let tx = Transaction::new(
            script,
            arguments,
            Identifier::from_array(fixed::<IDENTIFIER_LENGTH>(
                reference_block_id,
                "reference block id",
            )?),
            gas_limit.to_u64()?,
            ProposalKey::new(
                address(proposer, "proposer")?,
                small(key_index, "proposal key index")?,
                sequence_number.to_u64()?,
            ),
            address(payer, "payer")?,
            authorizers,
        );

        let signers = tx.signer_list();
        let payload_signatures = signatures(payload_sigs, &signers)?;
        let envelope_signatures = signatures(envelope_sigs, &signers)?;

        Ok(Transaction {
            payload_signatures,
            envelope_signatures,
            ..tx
        })
    }
}

fn expect_list<'a, const N: usize>(
    item: &'a RlpItem,
    field: &'static str,
) -> Result<&'a [RlpItem; N], TransactionError> {
    item.as_list()?
        .try_into()
        .map_err(|_| TransactionError::Malformed {
            field,
            reason: "wrong number of elements",
        })
}

fn fixed<const N: usize>(item: &RlpItem, field: &'static str) -> Result<[u8; N], TransactionError> {
    item.as_bytes()?
        .try_into()
        .map_err(|_| TransactionError::Malformed {
            field,
            reason: "wrong width",
        })
}

fn address(item: &RlpItem, field: &'static str) -> Result<Address, TransactionError> {
    fixed::<ADDRESS_LENGTH>(item, field).map(Address::from_array)
}

fn small(item: &RlpItem, field: &'static str) -> Result<u32, TransactionError> {
    u32::try_from(item.to_u64()?).map_err(|_| TransactionError::Malformed {
        field,
        reason: "wider than 32 bits",
    })
}

fn signatures(
    item: &RlpItem,
    signers: &[Address],
) -> Result<Vec<TransactionSignature>, TransactionError> {
    item.as_list()?
        .iter()
        .map(|tuple| -> Result<TransactionSignature, TransactionError> {
            let [signer_index, key_index, signature] = expect_list::<3>(tuple, "signature")?;
            let index = signer_index.to_u64()?;
            let address = usize::try_from(index)
                .ok()
                .and_then(|i| signers.get(i))
                .copied()
                .ok_or(TransactionError::SignerIndexOutOfRange {
                    index,
                    signers: signers.len(),
                })?;
            Ok(TransactionSignature::new(
                address,
                small(signer_index, "signer index")?,
                small(key_index, "key index")?,
                signature.as_bytes()?.to_vec(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD_HEX: &str = "f86a97696d706f7274203078736f6d657468696e67200a207b7dc88302020383030303a000000000000000000000000000000000000000000000000000000303030606062c8800000405040504050b07880000000605040302d2880000000909090909880000000809090909";
    const SIGS_HEX: &str = "d6ce80808b0404040404040404040404c6050483030303";

    fn addr(bytes: &[u8]) -> Address {
        Address::from_bytes(bytes).unwrap()
    }

    fn sample() -> Transaction {
        Transaction::new(
            "import 0xsomething \n {}",
            vec![Argument::new(vec![2, 2, 3]), Argument::new(vec![3, 3, 3])],
            Identifier::from_bytes(&[3, 3, 3, 6, 6, 6]).unwrap(),
            44,
            ProposalKey::new(addr(&[4, 5, 4, 5, 4, 5]), 11, 7),
            addr(&[6, 5, 4, 3, 2]),
            vec![addr(&[9, 9, 9, 9, 9]), addr(&[8, 9, 9, 9, 9])],
        )
    }

    fn with_payload_sigs() -> Transaction {
        sample()
            .with_payload_signature(TransactionSignature::new(
                addr(&[4, 5, 4, 5, 4, 5]),
                0,
                0,
                vec![4; 11],
            ))
            .with_payload_signature(TransactionSignature::new(
                addr(&[1]),
                5,
                4,
                vec![3, 3, 3],
            ))
    }

    #[test]
    fn canonical_payload_vector() {
        assert_eq!(hex::encode(sample().canonical_payload().unwrap()), PAYLOAD_HEX);
    }

    #[test]
    fn authorization_envelope_vector() {
        let expected = format!("f883{PAYLOAD_HEX}{SIGS_HEX}");
        assert_eq!(
            hex::encode(with_payload_sigs().canonical_authorization_envelope().unwrap()),
            expected
        );
    }

    #[test]
    fn payment_envelope_vectors() {
        let tx = with_payload_sigs();
        assert_eq!(
            hex::encode(tx.canonical_payment_envelope().unwrap()),
            format!("f884{PAYLOAD_HEX}{SIGS_HEX}c0")
        );

        let paid = tx.with_envelope_signature(TransactionSignature::new(
            addr(&[6, 5, 4, 3, 2]),
            1,
            2,
            vec![7, 7, 7, 7],
        ));
        assert_eq!(
            hex::encode(paid.canonical_payment_envelope().unwrap()),
            format!("f88c{PAYLOAD_HEX}{SIGS_HEX}c8c701028407070707")
        );
    }

    #[test]
    fn id_is_sha3_of_payment_envelope() {
        assert_eq!(
            with_payload_sigs().id().unwrap().to_hex(),
            "476b10e7f9e5076fb9339afabd07cf87f02c35697653b1b13f32ed8ac9c119fb"
        );
    }

    #[test]
    fn payload_ignores_signatures() {
        let signed = with_payload_sigs();
        assert_eq!(
            signed.canonical_payload().unwrap(),
            sample().canonical_payload().unwrap()
        );
        assert_ne!(
            signed.canonical_authorization_envelope().unwrap(),
            sample().canonical_authorization_envelope().unwrap()
        );
    }

    #[test]
    fn authorization_envelope_ignores_envelope_signatures() {
        let tx = with_payload_sigs();
        let paid = tx.with_envelope_signature(TransactionSignature::new(
            tx.payer(),
            3,
            0,
            vec![1],
        ));
        assert_eq!(
            paid.canonical_authorization_envelope().unwrap(),
            tx.canonical_authorization_envelope().unwrap()
        );
        assert_ne!(paid.id().unwrap(), tx.id().unwrap());
    }

    #[test]
    fn with_signature_leaves_original_untouched() {
        let tx = sample();
        let before = tx.clone();
        let _ = tx.with_payload_signature(TransactionSignature::new(tx.payer(), 3, 0, vec![1]));
        assert_eq!(tx, before);
        assert!(tx.payload_signatures().is_empty());
    }

    #[test]
    fn signer_list_deduplicates_in_order() {
        let p = addr(&[1]);
        let a = addr(&[2]);
        let b = addr(&[3]);
        let tx = Transaction::new(
            "",
            vec![],
            Identifier::default(),
            1,
            ProposalKey::new(p, 0, 0),
            p,
            vec![a, b],
        );
        assert_eq!(tx.signer_list(), vec![p, a, b]);
        assert_eq!(tx.signer_index(a), Some(1));
        assert_eq!(tx.signer_index(addr(&[4])), None);

        // Duplicate authorizers stay in the payload but not in the signer list.
        let dup = Transaction::new(
            "",
            vec![],
            Identifier::default(),
            1,
            ProposalKey::new(p, 0, 0),
            b,
            vec![a, p, a],
        );
        assert_eq!(dup.authorizers(), &[a, p, a]);
        assert_eq!(dup.signer_list(), vec![p, a, b]);
    }

    #[test]
    fn payment_envelope_round_trips() {
        let tx = sample();
        let proposer = tx.proposal_key().address;
        let signed = tx
            .with_payload_signature(TransactionSignature::new(proposer, 0, 11, vec![0xaa; 64]))
            .with_payload_signature(TransactionSignature::new(
                tx.authorizers()[1],
                2,
                0,
                vec![0xbb; 64],
            ))
            .with_envelope_signature(TransactionSignature::new(tx.payer(), 3, 1, vec![0xcc; 64]));

        let bytes = signed.canonical_payment_envelope().unwrap();
        let decoded = Transaction::from_payment_envelope(&bytes).unwrap();
        assert_eq!(decoded, signed);
        assert_eq!(decoded.id().unwrap(), signed.id().unwrap());
    }

    #[test]
    fn decoding_rejects_bad_envelopes() {
        // Authorization envelope: two elements instead of three.
        let auth = with_payload_sigs().canonical_authorization_envelope().unwrap();
        assert!(matches!(
            Transaction::from_payment_envelope(&auth),
            Err(TransactionError::Malformed { field: "payment envelope", .. })
        ));

        // Signer index 5 with only four signers.
        let bad_index = with_payload_sigs().canonical_payment_envelope().unwrap();
        assert_eq!(
            Transaction::from_payment_envelope(&bad_index),
            Err(TransactionError::SignerIndexOutOfRange { index: 5, signers: 4 })
        );

        // Trailing garbage.
        let mut trailing = sample().canonical_payment_envelope().unwrap();
        trailing.push(0x00);
        assert!(matches!(
            Transaction::from_payment_envelope(&trailing),
            Err(TransactionError::Encoding(RlpError::TrailingBytes { .. }))
        ));
    }

    #[test]
    fn decoding_rejects_short_addresses() {
        let mut item = sample().payload_item();
        if let RlpItem::List(fields) = &mut item {
            fields[7] = RlpItem::bytes(vec![6, 5, 4, 3, 2]);
        }
        let envelope = rlp::encode(&RlpItem::list(vec![
            item,
            RlpItem::list(vec![]),
            RlpItem::list(vec![]),
        ]))
        .unwrap();
        assert_eq!(
            Transaction::from_payment_envelope(&envelope),
            Err(TransactionError::Malformed {
                field: "payer",
                reason: "wrong width"
            })
        );
    }

    #[test]
    fn decoding_rejects_deep_nesting() {
        let mut deep = RlpItem::list(vec![]);
        for _ in 0..crate::config::RLP_MAX_DEPTH {
            deep = RlpItem::list(vec![deep]);
        }
        let envelope = rlp::encode(&RlpItem::list(vec![deep])).unwrap();
        assert_eq!(
            Transaction::from_payment_envelope(&envelope),
            Err(TransactionError::Encoding(RlpError::TooDeep {
                limit: crate::config::RLP_MAX_DEPTH
            }))
        );
    }

    #[test]
    fn missing_gas_limit_takes_the_default() {
        let mut json = serde_json::to_value(sample()).unwrap();
        json.as_object_mut().unwrap().remove("gas_limit");
        let tx: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(tx.gas_limit(), DEFAULT_GAS_LIMIT);
        assert_eq!(tx.script(), sample().script());
    }

    #[test]
    fn serde_round_trip() {
        let tx = with_payload_sigs();
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
