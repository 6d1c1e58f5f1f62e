//! Subcommand implementations.
//!
//! Each command returns the text it would print so tests can check output
//! without capturing stdout.

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;

use flow_sdk::cadence;
use flow_sdk::crypto::InMemorySigner;
use flow_sdk::transaction::{add_envelope_signature, add_payload_signature, Transaction};
use flow_sdk::types::Address;

use crate::cli::{Role, SignArgs};

/// Reads a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn load_transaction(path: &Path) -> Result<Transaction> {
    let text = read_input(path)?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid transaction", path.display()))
}

/// `payload`: canonical payload hex.
pub fn payload(tx: &Transaction) -> Result<String> {
    Ok(hex::encode(tx.canonical_payload()?))
}

/// `envelope`: both envelopes and the transaction id, as JSON.
pub fn envelope(tx: &Transaction) -> Result<String> {
    let report = serde_json::json!({
        "authorization_envelope": hex::encode(tx.canonical_authorization_envelope()?),
        "payment_envelope": hex::encode(tx.canonical_payment_envelope()?),
        "id": tx.id()?.to_hex(),
        "signers": tx.signer_list().iter().map(Address::to_string).collect::<Vec<_>>(),
    });
    Ok(serde_json::to_string_pretty(&report)?)
}

/// `sign`: the transaction with one more signature.
pub fn sign(tx: &Transaction, args: &SignArgs) -> Result<Transaction> {
    let address = Address::from_hex(&args.address)
        .with_context(|| format!("invalid address {:?}", args.address))?;
    let signer = InMemorySigner::from_hex(&args.secret_key, args.hash.into())
        .context("invalid secret key")?;

    let signed = match args.role {
        Role::Payload => add_payload_signature(tx, address, args.key_index, &signer)?,
        Role::Envelope => add_envelope_signature(tx, address, args.key_index, &signer)?,
    };
    tracing::info!(
        %address,
        key_index = args.key_index,
        role = ?args.role,
        public_key = %hex::encode(signer.public_key_bytes()),
        "signature added"
    );
    Ok(signed)
}

/// `inspect`: transaction JSON decoded from a payment envelope.
pub fn inspect(envelope_hex: &str) -> Result<String> {
    let trimmed = envelope_hex.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.is_empty() {
        bail!("empty envelope");
    }
    let bytes = hex::decode(digits).context("envelope is not hex")?;
    let tx = Transaction::from_payment_envelope(&bytes).context("not a payment envelope")?;
    tracing::debug!(id = %tx.id()?, "envelope decoded");
    Ok(serde_json::to_string_pretty(&tx)?)
}

/// `decode`: a JSON-Cadence value re-encoded in canonical form.
pub fn decode(text: &str) -> Result<String> {
    let value = cadence::decode_str(text).context("not a JSON-Cadence value")?;
    tracing::debug!(tag = %value.type_tag(), "value decoded");
    Ok(serde_json::to_string_pretty(&cadence::encode(&value))?)
}

pub fn write_transaction(tx: &Transaction, output: Option<&Path>) -> Result<Option<String>> {
    let json = serde_json::to_string_pretty(tx)?;
    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(None)
        }
        None => Ok(Some(json)),
    }
}
