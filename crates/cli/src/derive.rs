//! Derive command implementation
//!
//! Reads the validator key file, derives the linked EVM account, and prints
//! the identities plus a signed ownership proof.

use crate::keyfile::ValidatorKeyFile;
use anyhow::{bail, Context, Result};
use keybridge_crypto::LinkedKeys;
use std::path::Path;
use tracing::debug;

/// Execute the derive command
pub fn execute(key_file: &Path, format: &str) -> Result<()> {
    let file = ValidatorKeyFile::load(key_file)?;
    let secret = file.validator_secret()?;
    debug!("loaded validator secret from {}", key_file.display());

    let keys = LinkedKeys::derive(&secret).context("Key derivation failed")?;
    let proof = keys.prove_ownership().context("Proof signing failed")?;

    let consensus_pubkey = hex::encode(keys.consensus_pubkey().to_bytes());
    let validator_address = keys.validator_address().to_string();
    let evm_secret = format!("0x{}", hex::encode(keys.evm_secret().to_bytes()));
    let evm_address = format!("0x{}", hex::encode(keys.evm_address()));
    let signature = hex::encode(proof.signature.to_bytes());
    let recovery_id = proof.signature.recovery_id();

    match format {
        "json" => {
            let output = serde_json::json!({
                "validator": {
                    "ed25519_pubkey": consensus_pubkey,
                    "address": validator_address,
                },
                "evm": {
                    "secp256k1_secret": evm_secret,
                    "address": evm_address,
                },
                "proof": {
                    "validator_address": validator_address,
                    "evm_address": evm_address,
                    "message": proof.message(),
                    "signature": signature,
                    "recovery_id": recovery_id,
                },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        "text" => {
            println!("Validator Identity");
            println!("  Ed25519 Public Key: {}", consensus_pubkey);
            println!("  Validator Address:  {}", validator_address);
            println!();
            println!("Derived EVM Account");
            println!("  Secp256k1 Secret Key: {}", evm_secret);
            println!("  EVM Address:          {}", evm_address);
            println!();
            println!("Ownership Proof (safe to share)");
            println!("  Message:     {}", proof.message());
            println!("  Signature:   {}", signature);
            println!("  Recovery ID: {}", recovery_id);
            println!();
            println!("To verify this proof, anyone can run:");
            println!(
                "  keybridge verify {} {} {} {}",
                validator_address, evm_address, signature, recovery_id
            );
        }

        other => bail!("Unknown output format: {} (expected text or json)", other),
    }

    Ok(())
}
