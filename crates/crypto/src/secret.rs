//! Secure container for the raw validator secret
//!
//! `ValidatorSecret` holds the 32-byte seed of the validator's ed25519 key.
//! It ensures that:
//! - The seed is zeroized when the value is dropped
//! - Debug output doesn't expose the actual bytes
//! - The value cannot be accidentally cloned

use crate::error::CryptoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the validator secret in bytes
pub const SECRET_LENGTH: usize = 32;

/// Memory-safe container for the validator's raw ed25519 seed.
///
/// This struct intentionally does NOT implement `Clone` to prevent
/// accidental copies of sensitive material.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ValidatorSecret([u8; SECRET_LENGTH]);

impl ValidatorSecret {
    /// Create from a 32-byte seed
    pub fn from_seed(seed: [u8; SECRET_LENGTH]) -> Self {
        Self(seed)
    }

    /// Create from a byte slice, which must be exactly 32 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let seed: [u8; SECRET_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: SECRET_LENGTH,
                    actual: bytes.len(),
                })?;
        Ok(Self(seed))
    }

    /// Get a reference to the seed.
    ///
    /// The returned reference should be used immediately and not stored; the
    /// seed is zeroized when this `ValidatorSecret` is dropped.
    #[inline]
    pub fn as_seed(&self) -> &[u8; SECRET_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for ValidatorSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorSecret")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
