//! Ed25519 keys for the validator identity
//!
//! The validator's consensus identity is an ed25519 key pair. Only key
//! handling and address derivation are needed here: the ownership proof
//! itself is signed with the derived secp256k1 key, never with this one.
//!
//! ValidatorAddress derivation: sha256(pubkey)[..20], uppercase hex.

use crate::address::ValidatorAddress;
use crate::error::CryptoError;
use ed25519_consensus::{SigningKey as Ed25519Secret, VerificationKey as Ed25519Pubkey};
use rand::{CryptoRng, RngCore};

/// Ed25519 secret key (32 bytes seed)
#[derive(Clone)]
pub struct Ed25519SecretKey(Ed25519Secret);

impl Ed25519SecretKey {
    /// Generate a new random secret key
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        Self::from_seed(&seed)
    }

    /// Create from seed bytes (32 bytes)
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self(Ed25519Secret::from(*seed))
    }

    /// Serialize to bytes (32-byte seed)
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Get the corresponding public key
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.0.verification_key())
    }
}

impl std::fmt::Debug for Ed25519SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Ed25519 public key (32 bytes)
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey(Ed25519Pubkey);

impl Ed25519PublicKey {
    /// Load from bytes (32 bytes)
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        Ed25519Pubkey::try_from(*bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Serialize to bytes (32 bytes)
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Derive the validator address from this public key
    pub fn validator_address(&self) -> ValidatorAddress {
        ValidatorAddress::from_ed25519_pubkey(&self.to_bytes())
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.to_bytes();
        write!(f, "Ed25519PublicKey({})", hex::encode(&bytes[..8]))
    }
}

/// Ed25519 key pair (convenience wrapper)
#[derive(Clone)]
pub struct Ed25519KeyPair {
    pub secret_key: Ed25519SecretKey,
    pub public_key: Ed25519PublicKey,
}

impl Ed25519KeyPair {
    /// Generate a new random key pair
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let secret_key = Ed25519SecretKey::generate(rng);
        let public_key = secret_key.public_key();
        Self {
            secret_key,
            public_key,
        }
    }

    /// Create from secret key
    pub fn from_secret_key(secret_key: Ed25519SecretKey) -> Self {
        let public_key = secret_key.public_key();
        Self {
            secret_key,
            public_key,
        }
    }

    /// Get the validator address derived from this key pair
    pub fn validator_address(&self) -> ValidatorAddress {
        self.public_key.validator_address()
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public_key", &self.public_key)
            .finish()
    }
}
