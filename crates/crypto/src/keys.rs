//! Dual key structure linking the validator and EVM identities
//!
//! A validator carries two key types:
//! - Ed25519: the consensus identity, from which the validator address is
//!   derived (sha256(pubkey)[..20])
//! - Secp256k1: the EVM identity, derived deterministically from the ed25519
//!   seed via HKDF (see [`crate::derive`])
//!
//! `LinkedKeys` bundles both and caches the validator address so that the
//! whole pipeline from secret to ownership proof is a single call chain.

use crate::address::ValidatorAddress;
use crate::derive::derive_secp256k1_secret;
use crate::ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519SecretKey};
use crate::error::CryptoError;
use crate::proof::OwnershipProof;
use crate::secp256k1::{Secp256k1KeyPair, Secp256k1SecretKey};
use crate::secret::ValidatorSecret;
use alloy_primitives::Address;

/// Complete key set for a linked validator
///
/// Contains both:
/// - The consensus key pair (ed25519), reconstructed from the seed
/// - The EVM key pair (secp256k1), derived from the same seed
#[derive(Clone)]
pub struct LinkedKeys {
    /// Ed25519 keys for the consensus identity
    pub consensus: Ed25519KeyPair,
    /// Secp256k1 keys for the EVM identity
    pub evm: Secp256k1KeyPair,
    /// Cached validator address (derived from the ed25519 pubkey)
    validator_address: ValidatorAddress,
}

impl LinkedKeys {
    /// Derive the full key set from a validator secret
    pub fn derive(secret: &ValidatorSecret) -> Result<Self, CryptoError> {
        let consensus =
            Ed25519KeyPair::from_secret_key(Ed25519SecretKey::from_seed(secret.as_seed()));
        let evm = Secp256k1KeyPair::from_secret_key(derive_secp256k1_secret(secret)?);
        let validator_address = consensus.validator_address();

        Ok(Self {
            consensus,
            evm,
            validator_address,
        })
    }

    /// Get the validator address (derived from the ed25519 pubkey)
    pub fn validator_address(&self) -> ValidatorAddress {
        self.validator_address
    }

    /// Get the EVM address (derived from the secp256k1 pubkey)
    pub fn evm_address(&self) -> Address {
        self.evm.evm_address()
    }

    /// Get the ed25519 public key
    pub fn consensus_pubkey(&self) -> &Ed25519PublicKey {
        &self.consensus.public_key
    }

    /// Get the derived secp256k1 secret key
    pub fn evm_secret(&self) -> &Secp256k1SecretKey {
        &self.evm.secret_key
    }

    /// Sign the ownership claim linking both identities
    pub fn prove_ownership(&self) -> Result<OwnershipProof, CryptoError> {
        OwnershipProof::sign(&self.evm.secret_key, self.validator_address)
    }
}

impl std::fmt::Debug for LinkedKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedKeys")
            .field("validator_address", &self.validator_address)
            .field("evm_address", &self.evm_address())
            .finish()
    }
}
