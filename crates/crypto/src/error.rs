//! Cryptographic error types

use thiserror::Error;

/// Errors produced by key handling, derivation, and proof operations.
///
/// A failed verification is NOT one of these: when a signature parses and
/// recovers correctly but was made by a different key, verification returns
/// [`crate::Verification::Mismatch`] as an `Ok` value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Secret key material has the wrong length
    #[error("invalid secret key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Invalid secret key bytes
    #[error("invalid secret key bytes")]
    InvalidSecretKey,

    /// Invalid public key bytes
    #[error("invalid public key bytes")]
    InvalidPublicKey,

    /// Address string does not parse
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Signature does not parse as a compact 64-byte r||s signature
    #[error("malformed signature bytes")]
    MalformedSignature,

    /// Recovery id outside the valid range
    #[error("recovery id {0} out of range (must be 0 or 1)")]
    InvalidRecoveryId(u8),

    /// No public key is recoverable from the signature
    #[error("public key recovery failed")]
    RecoveryFailed,

    /// Key derivation produced no usable key
    #[error("key derivation failed")]
    DerivationFailed,

    /// Signing failed
    #[error("signing failed")]
    SigningFailed,
}
