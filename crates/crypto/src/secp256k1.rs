//! Secp256k1 keys and recoverable signatures for the EVM identity
//!
//! This module provides the EVM-compatible half of the key link:
//! - EVM address derivation (keccak256(uncompressed_pubkey[1..])[12..])
//! - Recoverable ECDSA signing over keccak256 digests
//! - Public key recovery from a signature and recovery id
//!
//! Uses the k256 crate for secp256k1 curve operations. Signing is
//! deterministic (RFC 6979 nonces) and signatures are low-s normalized, so
//! the same key and message always produce the same signature bytes.

use crate::error::CryptoError;
use alloy_primitives::{keccak256, Address};
use k256::{
    ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey},
    elliptic_curve::sec1::ToEncodedPoint,
    SecretKey as K256SecretKey,
};
use rand::{CryptoRng, RngCore};

/// Secp256k1 secret key (32 bytes scalar)
#[derive(Clone)]
pub struct Secp256k1SecretKey(K256SecretKey);

impl Secp256k1SecretKey {
    /// Generate a new random secret key
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(K256SecretKey::random(rng))
    }

    /// Load from raw bytes (32 bytes scalar)
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        K256SecretKey::from_slice(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidSecretKey)
    }

    /// Serialize to bytes (32 bytes scalar)
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes().into()
    }

    /// Get the corresponding public key
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey(self.0.public_key())
    }

    /// Sign a message with a recoverable signature.
    ///
    /// The message is hashed with keccak256 (EVM convention) and the digest
    /// signed with an RFC 6979 deterministic nonce. The recovery id of the
    /// returned signature is always 0 or 1.
    pub fn sign_recoverable(&self, msg: &[u8]) -> Result<RecoverableSignature, CryptoError> {
        let signing_key = SigningKey::from(&self.0);
        let digest = keccak256(msg);
        let (signature, recovery_id) = signing_key
            .sign_prehash_recoverable(digest.as_slice())
            .map_err(|_| CryptoError::SigningFailed)?;
        if recovery_id.is_x_reduced() {
            return Err(CryptoError::SigningFailed);
        }
        Ok(RecoverableSignature {
            signature,
            recovery_id,
        })
    }
}

impl std::fmt::Debug for Secp256k1SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Secp256k1 public key
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1PublicKey(k256::PublicKey);

impl Secp256k1PublicKey {
    /// Load from uncompressed SEC1 bytes (65 bytes, leading 0x04)
    pub fn from_uncompressed_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != 65 || bytes[0] != 0x04 {
            return Err(CryptoError::InvalidPublicKey);
        }
        k256::PublicKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Recover the signer's public key from a message and signature.
    ///
    /// The message is hashed with keccak256 exactly as in
    /// [`Secp256k1SecretKey::sign_recoverable`].
    pub fn recover(msg: &[u8], signature: &RecoverableSignature) -> Result<Self, CryptoError> {
        let digest = keccak256(msg);
        let verifying_key = VerifyingKey::recover_from_prehash(
            digest.as_slice(),
            &signature.signature,
            signature.recovery_id,
        )
        .map_err(|_| CryptoError::RecoveryFailed)?;
        Ok(Self(k256::PublicKey::from(&verifying_key)))
    }

    /// Serialize to compressed bytes (33 bytes)
    pub fn to_bytes(&self) -> [u8; 33] {
        let encoded = self.0.to_encoded_point(true);
        let mut result = [0u8; 33];
        result.copy_from_slice(encoded.as_bytes());
        result
    }

    /// Serialize to uncompressed bytes (65 bytes, with 0x04 prefix)
    pub fn to_uncompressed_bytes(&self) -> [u8; 65] {
        let encoded = self.0.to_encoded_point(false);
        let mut result = [0u8; 65];
        result.copy_from_slice(encoded.as_bytes());
        result
    }

    /// Derive the EVM address from this public key
    ///
    /// Uses keccak256(uncompressed_pubkey[1..])[12..] (Ethereum address format, 20 bytes)
    pub fn evm_address(&self) -> Address {
        let uncompressed = self.to_uncompressed_bytes();
        // Skip the 0x04 prefix byte
        let hash = keccak256(&uncompressed[1..]);
        Address::from_slice(&hash[12..])
    }
}

impl std::fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.to_bytes();
        write!(f, "Secp256k1PublicKey({})", hex::encode(&bytes[..8]))
    }
}

/// Recoverable ECDSA signature: compact 64-byte r||s plus a recovery id.
///
/// The recovery id (0 or 1) selects which of the two candidate public keys
/// produced the signature, which is what makes public-key recovery possible
/// from the signature and message alone.
#[derive(Clone, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub(crate) signature: K256Signature,
    pub(crate) recovery_id: RecoveryId,
}

impl RecoverableSignature {
    /// Load from compact signature bytes (64 bytes: r || s) and a recovery id
    pub fn from_compact(bytes: &[u8], recovery_id: u8) -> Result<Self, CryptoError> {
        let recovery_id = RecoveryId::from_byte(recovery_id)
            .filter(|id| !id.is_x_reduced())
            .ok_or(CryptoError::InvalidRecoveryId(recovery_id))?;
        let signature =
            K256Signature::from_slice(bytes).map_err(|_| CryptoError::MalformedSignature)?;
        Ok(Self {
            signature,
            recovery_id,
        })
    }

    /// Serialize the compact signature (64 bytes: r || s)
    pub fn to_bytes(&self) -> [u8; 64] {
        self.signature.to_bytes().into()
    }

    /// Get the recovery id (0 or 1)
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id.to_byte()
    }
}

impl std::fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.to_bytes();
        write!(
            f,
            "RecoverableSignature({}, recid={})",
            hex::encode(&bytes[..8]),
            self.recovery_id()
        )
    }
}

/// Secp256k1 key pair (convenience wrapper)
#[derive(Clone)]
pub struct Secp256k1KeyPair {
    pub secret_key: Secp256k1SecretKey,
    pub public_key: Secp256k1PublicKey,
}

impl Secp256k1KeyPair {
    /// Generate a new random key pair
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let secret_key = Secp256k1SecretKey::generate(rng);
        let public_key = secret_key.public_key();
        Self {
            secret_key,
            public_key,
        }
    }

    /// Create from secret key
    pub fn from_secret_key(secret_key: Secp256k1SecretKey) -> Self {
        let public_key = secret_key.public_key();
        Self {
            secret_key,
            public_key,
        }
    }

    /// Sign a message with a recoverable signature
    pub fn sign_recoverable(&self, msg: &[u8]) -> Result<RecoverableSignature, CryptoError> {
        self.secret_key.sign_recoverable(msg)
    }

    /// Get the EVM address derived from this key pair
    pub fn evm_address(&self) -> Address {
        self.public_key.evm_address()
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("public_key", &self.public_key)
            .field("evm_address", &self.evm_address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_key_roundtrip() {
        let keypair = Secp256k1KeyPair::generate(&mut rand::thread_rng());
        let bytes = keypair.secret_key.to_bytes();
        let restored = Secp256k1SecretKey::from_bytes(&bytes).unwrap();
        assert_eq!(keypair.secret_key.to_bytes(), restored.to_bytes());
    }

    #[test]
    fn test_from_bytes_rejects_invalid_scalar() {
        // Zero is not a valid secret scalar
        assert!(Secp256k1SecretKey::from_bytes(&[0u8; 32]).is_err());
        // Neither is anything >= the curve order
        assert!(Secp256k1SecretKey::from_bytes(&[0xFF; 32]).is_err());
    }

    #[test]
    fn test_sign_and_recover() {
        let keypair = Secp256k1KeyPair::generate(&mut rand::thread_rng());
        let msg = b"test message";
        let sig = keypair.sign_recoverable(msg).unwrap();

        assert!(sig.recovery_id() <= 1);

        let recovered = Secp256k1PublicKey::recover(msg, &sig).unwrap();
        assert_eq!(recovered.to_bytes(), keypair.public_key.to_bytes());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let keypair = Secp256k1KeyPair::generate(&mut rand::thread_rng());
        let msg = b"deterministic nonce check";
        let sig1 = keypair.sign_recoverable(msg).unwrap();
        let sig2 = keypair.sign_recoverable(msg).unwrap();
        assert_eq!(sig1.to_bytes(), sig2.to_bytes());
        assert_eq!(sig1.recovery_id(), sig2.recovery_id());
    }

    #[test]
    fn test_recover_wrong_message_gives_other_key() {
        let keypair = Secp256k1KeyPair::generate(&mut rand::thread_rng());
        let sig = keypair.sign_recoverable(b"signed message").unwrap();

        // Recovery over a different message either fails outright or yields
        // a key that is not ours; it must never return the signer's key.
        match Secp256k1PublicKey::recover(b"other message", &sig) {
            Ok(recovered) => assert_ne!(recovered.to_bytes(), keypair.public_key.to_bytes()),
            Err(e) => assert_eq!(e, CryptoError::RecoveryFailed),
        }
    }

    #[test]
    fn test_evm_address_known_vector() {
        // Private key 0x...01 has the well-known address
        // 0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf
        let mut secret_bytes = [0u8; 32];
        secret_bytes[31] = 1;
        let secret = Secp256k1SecretKey::from_bytes(&secret_bytes).unwrap();
        let addr = secret.public_key().evm_address();

        let expected =
            Address::from_slice(&hex::decode("7E5F4552091A69125d5DfCb7b8C2659029395Bdf").unwrap());
        assert_eq!(addr, expected);
    }

    #[test]
    fn test_uncompressed_bytes() {
        let keypair = Secp256k1KeyPair::generate(&mut rand::thread_rng());
        let uncompressed = keypair.public_key.to_uncompressed_bytes();

        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(uncompressed.len(), 65);

        let restored = Secp256k1PublicKey::from_uncompressed_bytes(&uncompressed).unwrap();
        assert_eq!(keypair.public_key.to_bytes(), restored.to_bytes());
    }

    #[test]
    fn test_from_uncompressed_rejects_bad_format() {
        let keypair = Secp256k1KeyPair::generate(&mut rand::thread_rng());

        // Compressed encoding is not accepted here
        let compressed = keypair.public_key.to_bytes();
        assert_eq!(
            Secp256k1PublicKey::from_uncompressed_bytes(&compressed).unwrap_err(),
            CryptoError::InvalidPublicKey
        );

        // Wrong prefix byte
        let mut bad_prefix = keypair.public_key.to_uncompressed_bytes();
        bad_prefix[0] = 0x03;
        assert!(Secp256k1PublicKey::from_uncompressed_bytes(&bad_prefix).is_err());

        // Truncated
        let uncompressed = keypair.public_key.to_uncompressed_bytes();
        assert!(Secp256k1PublicKey::from_uncompressed_bytes(&uncompressed[..64]).is_err());
    }

    #[test]
    fn test_from_compact_validates_inputs() {
        let keypair = Secp256k1KeyPair::generate(&mut rand::thread_rng());
        let sig = keypair.sign_recoverable(b"msg").unwrap();
        let bytes = sig.to_bytes();

        // Valid bytes roundtrip
        let restored = RecoverableSignature::from_compact(&bytes, sig.recovery_id()).unwrap();
        assert_eq!(restored.to_bytes(), bytes);

        // Recovery id out of range
        assert_eq!(
            RecoverableSignature::from_compact(&bytes, 2).unwrap_err(),
            CryptoError::InvalidRecoveryId(2)
        );
        assert_eq!(
            RecoverableSignature::from_compact(&bytes, 4).unwrap_err(),
            CryptoError::InvalidRecoveryId(4)
        );

        // Wrong length
        assert_eq!(
            RecoverableSignature::from_compact(&bytes[..63], 0).unwrap_err(),
            CryptoError::MalformedSignature
        );

        // r = s = 0 is not a valid signature
        assert_eq!(
            RecoverableSignature::from_compact(&[0u8; 64], 0).unwrap_err(),
            CryptoError::MalformedSignature
        );
    }
}
