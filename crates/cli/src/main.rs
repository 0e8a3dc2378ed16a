//! keybridge CLI
//!
//! Links a consensus validator key to a deterministic EVM account and
//! produces a publicly verifiable ownership proof.

mod derive;
mod keyfile;
mod verify;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Validator-to-EVM key link tool
#[derive(Parser)]
#[command(name = "keybridge")]
#[command(version)]
#[command(about = "Link a validator key to an EVM account", long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// The logging level (trace|debug|info|warn|error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Print out full error chains
    #[arg(long, global = true, default_value = "false")]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the linked EVM account and ownership proof from a validator key file
    ///
    /// Reads a priv_validator_key.json, derives the deterministic secp256k1
    /// key from the ed25519 seed, and prints the validator address, the EVM
    /// address, and a signed ownership proof that is safe to share publicly.
    Derive {
        /// Path to priv_validator_key.json
        key_file: PathBuf,

        /// Output format (text|json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Verify an ownership proof from its public parts
    ///
    /// Recovers the signer's public key from the signature and checks that
    /// the derived EVM address matches the claimed one. Needs no secret
    /// material; anyone can run this against a published proof.
    Verify {
        /// Validator address (40 hex chars, as printed by derive)
        validator_address: String,

        /// Claimed EVM address (0x-prefixed hex, any casing)
        evm_address: String,

        /// Compact signature (128 hex chars)
        signature: String,

        /// Recovery id (0 or 1; defaults to 0 when omitted)
        #[arg(default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
        recovery_id: u8,

        /// Output format (text|json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Derive { key_file, format } => derive::execute(&key_file, &format),

        Commands::Verify {
            validator_address,
            evm_address,
            signature,
            recovery_id,
            format,
        } => verify::execute(
            &validator_address,
            &evm_address,
            &signature,
            recovery_id,
            &format,
        ),
    };

    if let Err(e) = &result {
        if cli.trace {
            eprintln!("Error: {:?}", e);
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
