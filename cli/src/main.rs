// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Flow Transaction Tool
//!
//! Entry point for the `flow-tool` binary. Parses CLI arguments, initializes
//! logging, and runs one offline command against a transaction file.
//!
//! The binary supports six subcommands:
//!
//! - `payload`  — print the canonical payload hex
//! - `envelope` — print both envelopes and the transaction id
//! - `sign`     — add a payload or envelope signature
//! - `inspect`  — decode a payment envelope into transaction JSON
//! - `decode`   — decode and re-encode a JSON-Cadence value
//! - `version`  — print build version information

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use cli::{Commands, FlowToolCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = FlowToolCli::parse();
    logging::init_logging(
        "flow_tool=info,flow_sdk=warn",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Payload(args) => {
            let tx = commands::load_transaction(&args.tx)?;
            println!("{}", commands::payload(&tx)?);
        }
        Commands::Envelope(args) => {
            let tx = commands::load_transaction(&args.tx)?;
            println!("{}", commands::envelope(&tx)?);
        }
        Commands::Sign(args) => {
            let tx = commands::load_transaction(&args.tx)?;
            let signed = commands::sign(&tx, &args)?;
            if let Some(json) = commands::write_transaction(&signed, args.output.as_deref())? {
                println!("{json}");
            }
        }
        Commands::Inspect(args) => {
            println!("{}", commands::inspect(&args.envelope)?);
        }
        Commands::Decode(args) => {
            let text = commands::read_input(&args.input)?;
            println!("{}", commands::decode(&text)?);
        }
        Commands::Version => print_version(),
    }
    Ok(())
}

fn print_version() {
    println!("flow-tool {}", env!("CARGO_PKG_VERSION"));
    println!(
        "address width {} bytes, identifier width {} bytes",
        flow_sdk::config::ADDRESS_LENGTH,
        flow_sdk::config::IDENTIFIER_LENGTH,
    );
}
