//! # CLI Interface
//!
//! Defines the command-line argument structure for `flow-tool` using
//! `clap` derive. Every subcommand works offline: transactions are read from
//! and written to JSON files, envelopes are printed as hex.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use flow_sdk::crypto::HashAlgorithm;

/// Offline Flow transaction tool.
///
/// Encodes transactions into their canonical byte forms, signs them with a
/// local secp256k1 key, and decodes envelopes and JSON-Cadence values.
#[derive(Parser, Debug)]
#[command(
    name = "flow-tool",
    about = "Encode, sign, and inspect Flow transactions",
    version,
    propagate_version = true
)]
pub struct FlowToolCli {
    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, env = "FLOW_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for `flow-tool`.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the canonical payload of a transaction as hex.
    Payload(TxFileArgs),
    /// Print the authorization envelope, payment envelope, and transaction id.
    Envelope(TxFileArgs),
    /// Add a payload or envelope signature to a transaction.
    Sign(SignArgs),
    /// Decode a hex payment envelope into transaction JSON.
    Inspect(InspectArgs),
    /// Decode a JSON-Cadence value and print its canonical encoding.
    Decode(DecodeArgs),
    /// Print version information and exit.
    Version,
}

/// A transaction JSON file.
#[derive(Parser, Debug)]
pub struct TxFileArgs {
    /// Path to the transaction JSON, or `-` for stdin.
    pub tx: PathBuf,
}

/// Which signature list the new signature goes into.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Proposer or authorizer: signs the payload.
    Payload,
    /// Payer: signs the authorization envelope.
    Envelope,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashArg {
    #[value(name = "sha2-256")]
    Sha2,
    #[value(name = "sha3-256")]
    Sha3,
}

impl From<HashArg> for HashAlgorithm {
    fn from(arg: HashArg) -> Self {
        match arg {
            HashArg::Sha2 => HashAlgorithm::Sha2_256,
            HashArg::Sha3 => HashAlgorithm::Sha3_256,
        }
    }
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    /// Path to the transaction JSON, or `-` for stdin.
    pub tx: PathBuf,

    /// Address of the signing account.
    #[arg(long)]
    pub address: String,

    /// Index of the key on the signing account.
    #[arg(long, default_value_t = 0)]
    pub key_index: u32,

    #[arg(long, value_enum, default_value_t = Role::Payload)]
    pub role: Role,

    /// Hash algorithm the account key is registered with.
    #[arg(long, value_enum, default_value_t = HashArg::Sha3)]
    pub hash: HashArg,

    /// Hex-encoded secp256k1 private key.
    ///
    /// **Prefer the environment variable** over the flag so the key does not
    /// end up in shell history.
    #[arg(long, env = "FLOW_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Write the signed transaction here instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Hex-encoded payment envelope, with or without `0x`.
    pub envelope: String,
}

/// Arguments for the `decode` subcommand.
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Path to a JSON-Cadence value, or `-` for stdin.
    pub input: PathBuf,
}
