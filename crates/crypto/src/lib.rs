//! Cryptographic link between a validator identity and an EVM account
//!
//! This crate provides:
//! - Ed25519 validator keys and SHA-256 based validator addresses
//! - Deterministic secp256k1 key derivation (HKDF-SHA256, fixed context)
//! - keccak256 based EVM address derivation
//! - Recoverable-signature ownership proofs and their public verification
//!
//! Every operation is a pure, synchronous function of its inputs; nothing
//! here touches the filesystem or the network.

pub mod address;
pub mod derive;
pub mod ed25519;
pub mod error;
pub mod keys;
pub mod proof;
pub mod secp256k1;
pub mod secret;

// Address exports
pub use address::ValidatorAddress;

// Derivation exports
pub use derive::{derive_secp256k1_secret, DERIVATION_CONTEXT};

// Ed25519 exports (validator identity)
pub use ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519SecretKey};

// Secp256k1 exports (EVM-compatible identity)
pub use secp256k1::{
    RecoverableSignature, Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1SecretKey,
};

// Dual key exports
pub use keys::LinkedKeys;

// Proof exports
pub use proof::{ownership_claim, verify_ownership, OwnershipProof, Verification, CLAIM_PREFIX};

// Error exports
pub use error::CryptoError;

// Secret material exports
pub use secret::ValidatorSecret;
