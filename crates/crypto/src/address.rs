//! Validator address type
//!
//! A validator address is the leading 20 bytes of SHA-256 over the ed25519
//! consensus public key. Its canonical rendering is uppercase hex with no
//! prefix; that exact string is what gets embedded in ownership claims.

use crate::error::CryptoError;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Validator address length in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Validator address (20 bytes, SHA-256 of the consensus public key)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatorAddress([u8; ADDRESS_LENGTH]);

impl ValidatorAddress {
    /// Derive from an ed25519 public key: SHA-256(pubkey), first 20 bytes
    pub fn from_ed25519_pubkey(pubkey: &[u8; 32]) -> Self {
        let digest = Sha256::digest(pubkey);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&digest[..ADDRESS_LENGTH]);
        Self(bytes)
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

impl fmt::Display for ValidatorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl fmt::Debug for ValidatorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidatorAddress({})", self)
    }
}

impl FromStr for ValidatorAddress {
    type Err = CryptoError;

    /// Parse 40 hex chars of either casing; the address renders back in the
    /// canonical uppercase form regardless of input casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| CryptoError::InvalidAddress(s.to_string()))?;
        let bytes: [u8; ADDRESS_LENGTH] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}
