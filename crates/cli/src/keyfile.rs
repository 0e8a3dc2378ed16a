//! Validator key file parsing
//!
//! Reads the CometBFT-style priv_validator_key.json and extracts the
//! 32-byte ed25519 seed. The file's own address field is ignored in favor
//! of re-derivation; when a pub_key entry is present it is checked against
//! the public key derived from the seed so a corrupt or mismatched file
//! fails loudly instead of producing a proof for the wrong validator.

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use keybridge_crypto::{Ed25519SecretKey, ValidatorSecret};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use zeroize::Zeroize;

/// A typed key entry as it appears in the key file
#[derive(Debug, Deserialize)]
pub struct KeyValue {
    /// Key type tag (e.g. "tendermint/PrivKeyEd25519"); informational only
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    /// Base64-encoded key bytes
    pub value: String,
}

/// On-disk validator key file (priv_validator_key.json layout)
#[derive(Debug, Deserialize)]
pub struct ValidatorKeyFile {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pub_key: Option<KeyValue>,
    pub priv_key: KeyValue,
}

impl ValidatorKeyFile {
    /// Load and parse a key file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read key file: {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse key file: {}", path.display()))
    }

    /// Extract the validator secret: the first 32 bytes of the private key.
    ///
    /// Accepts the usual 64-byte seed-plus-pubkey encoding as well as a bare
    /// 32-byte seed.
    pub fn validator_secret(&self) -> Result<ValidatorSecret> {
        let mut decoded = STANDARD
            .decode(&self.priv_key.value)
            .context("priv_key.value is not valid base64")?;

        if decoded.len() != 32 && decoded.len() != 64 {
            let n = decoded.len();
            decoded.zeroize();
            bail!("priv_key.value must decode to 32 or 64 bytes, got {}", n);
        }

        let mut seed = [0u8; 32];
        seed.copy_from_slice(&decoded[..32]);
        decoded.zeroize();

        let secret = ValidatorSecret::from_seed(seed);
        seed.zeroize();

        if let Some(pub_key) = &self.pub_key {
            let expected = STANDARD
                .decode(&pub_key.value)
                .context("pub_key.value is not valid base64")?;
            let derived = Ed25519SecretKey::from_seed(secret.as_seed()).public_key();
            if expected.as_slice() != derived.to_bytes().as_slice() {
                bail!(
                    "pub_key.value does not match the key derived from priv_key; \
                     the key file is corrupt or mismatched"
                );
            }
        }

        Ok(secret)
    }
}
