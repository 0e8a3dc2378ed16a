//! Verify command implementation
//!
//! Checks a published ownership proof from its public parts alone. A clean
//! mismatch is a negative answer, not a program failure: the command exits
//! zero either way and reports which address the signature actually came
//! from. Structural problems (bad hex, malformed signature, failed
//! recovery) exit non-zero.

use alloy_primitives::Address;
use anyhow::{bail, Context, Result};
use keybridge_crypto::{ownership_claim, verify_ownership, ValidatorAddress, Verification};
use tracing::debug;

/// Execute the verify command
pub fn execute(
    validator_address: &str,
    evm_address: &str,
    signature: &str,
    recovery_id: u8,
    format: &str,
) -> Result<()> {
    let validator_address: ValidatorAddress = validator_address
        .parse()
        .with_context(|| format!("Invalid validator address: {}", validator_address))?;
    let claimed: Address = evm_address
        .parse()
        .with_context(|| format!("Invalid EVM address: {}", evm_address))?;
    let signature_bytes = hex::decode(signature.trim_start_matches("0x"))
        .context("Signature is not valid hex")?;

    debug!(
        "verifying proof for validator {} against {}",
        validator_address, claimed
    );

    let verification =
        verify_ownership(&validator_address, claimed, &signature_bytes, recovery_id)?;

    let claimed_hex = format!("0x{}", hex::encode(claimed));
    let message = ownership_claim(&validator_address);

    match format {
        "json" => {
            let output = match &verification {
                Verification::Valid => serde_json::json!({
                    "valid": true,
                    "validator_address": validator_address.to_string(),
                    "evm_address": claimed_hex,
                    "message": message,
                }),
                Verification::Mismatch { claimed, recovered } => serde_json::json!({
                    "valid": false,
                    "validator_address": validator_address.to_string(),
                    "message": message,
                    "expected": format!("0x{}", hex::encode(claimed)),
                    "recovered": format!("0x{}", hex::encode(recovered)),
                }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        "text" => {
            println!("Ownership Proof Verification");
            println!("  Validator Address: {}", validator_address);
            println!("  Claimed EVM:       {}", claimed_hex);
            println!("  Message:           {}", message);
            println!();
            match &verification {
                Verification::Valid => {
                    println!("VALID: the signature was produced by {}", claimed_hex);
                    println!(
                        "Whoever controls that EVM account also controls validator {}",
                        validator_address
                    );
                }
                Verification::Mismatch { claimed, recovered } => {
                    println!("INVALID: the signature does not match the claimed account");
                    println!("  Expected:  0x{}", hex::encode(claimed));
                    println!("  Recovered: 0x{}", hex::encode(recovered));
                }
            }
        }

        other => bail!("Unknown output format: {} (expected text or json)", other),
    }

    Ok(())
}
