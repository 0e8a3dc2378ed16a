//! Ownership proof construction and verification
//!
//! The proof binds the validator address into a fixed claim string, hashes
//! the claim with keccak256, and signs the digest with the derived secp256k1
//! key. Because the signature is recoverable, verification needs no public
//! key up front: it recovers the signer's key from the signature, derives
//! the EVM address, and compares it against the claimed one. The claim must
//! be rebuilt byte-identically on both sides.

use crate::address::ValidatorAddress;
use crate::error::CryptoError;
use crate::secp256k1::{RecoverableSignature, Secp256k1PublicKey, Secp256k1SecretKey};
use alloy_primitives::Address;

/// Prefix of the signed ownership claim
pub const CLAIM_PREFIX: &str = "I control validator: ";

/// Build the canonical ownership claim for a validator address.
///
/// Signer and verifier both call this; the claim embeds the canonical
/// uppercase rendering of the address.
pub fn ownership_claim(validator_address: &ValidatorAddress) -> String {
    format!("{}{}", CLAIM_PREFIX, validator_address)
}

/// Outcome of proof verification.
///
/// `Mismatch` is a negative result, not an error: the signature parsed and
/// recovered correctly but was produced by a different key than claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The recovered address matches the claimed address
    Valid,
    /// The recovered address differs from the claimed address
    Mismatch {
        /// Address the proof claims to be from
        claimed: Address,
        /// Address actually recovered from the signature
        recovered: Address,
    },
}

impl Verification {
    /// True when the proof holds
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid)
    }
}

/// Signed ownership proof linking a validator address to an EVM address.
///
/// Carries no secret material; intended for public distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipProof {
    /// Address of the validator the claim speaks for
    pub validator_address: ValidatorAddress,
    /// EVM address of the key that signed the claim
    pub evm_address: Address,
    /// Recoverable signature over keccak256 of the claim
    pub signature: RecoverableSignature,
}

impl OwnershipProof {
    /// Sign the ownership claim for `validator_address` with the derived key
    pub fn sign(
        secret: &Secp256k1SecretKey,
        validator_address: ValidatorAddress,
    ) -> Result<Self, CryptoError> {
        let claim = ownership_claim(&validator_address);
        let signature = secret.sign_recoverable(claim.as_bytes())?;

        Ok(Self {
            validator_address,
            evm_address: secret.public_key().evm_address(),
            signature,
        })
    }

    /// The exact message that was signed
    pub fn message(&self) -> String {
        ownership_claim(&self.validator_address)
    }

    /// Verify this proof against its own claimed EVM address
    pub fn verify(&self) -> Result<Verification, CryptoError> {
        verify_ownership(
            &self.validator_address,
            self.evm_address,
            &self.signature.to_bytes(),
            self.signature.recovery_id(),
        )
    }
}

/// Verify an ownership proof from its public parts.
///
/// Rebuilds the claim, recovers the signer's public key from the signature
/// and recovery id, derives the EVM address, and compares it with the
/// claimed one. Structural failures (unparsable signature, recovery id out
/// of range, no recoverable curve point) surface as errors; a clean
/// non-match is the `Mismatch` result.
pub fn verify_ownership(
    validator_address: &ValidatorAddress,
    claimed: Address,
    signature: &[u8],
    recovery_id: u8,
) -> Result<Verification, CryptoError> {
    let signature = RecoverableSignature::from_compact(signature, recovery_id)?;
    let claim = ownership_claim(validator_address);
    let recovered = Secp256k1PublicKey::recover(claim.as_bytes(), &signature)?.evm_address();

    if recovered == claimed {
        Ok(Verification::Valid)
    } else {
        Ok(Verification::Mismatch { claimed, recovered })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secp256k1::Secp256k1KeyPair;

    fn test_keypair() -> Secp256k1KeyPair {
        Secp256k1KeyPair::generate(&mut rand::thread_rng())
    }

    fn test_address() -> ValidatorAddress {
        ValidatorAddress::from_bytes([0xC4; 20])
    }

    #[test]
    fn test_claim_format() {
        let addr: ValidatorAddress = "139E3940E64B5491722088D9A0D741628FC826E0".parse().unwrap();
        assert_eq!(
            ownership_claim(&addr),
            "I control validator: 139E3940E64B5491722088D9A0D741628FC826E0"
        );
    }

    #[test]
    fn test_claim_is_canonical_for_any_input_casing() {
        let lower: ValidatorAddress = "139e3940e64b5491722088d9a0d741628fc826e0".parse().unwrap();
        assert_eq!(
            ownership_claim(&lower),
            "I control validator: 139E3940E64B5491722088D9A0D741628FC826E0"
        );
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let keypair = test_keypair();
        let proof = OwnershipProof::sign(&keypair.secret_key, test_address()).unwrap();

        assert_eq!(proof.evm_address, keypair.evm_address());
        assert_eq!(proof.verify().unwrap(), Verification::Valid);
    }

    #[test]
    fn test_wrong_claimed_address_is_mismatch() {
        let keypair = test_keypair();
        let other = test_keypair();
        let proof = OwnershipProof::sign(&keypair.secret_key, test_address()).unwrap();

        let result = verify_ownership(
            &proof.validator_address,
            other.evm_address(),
            &proof.signature.to_bytes(),
            proof.signature.recovery_id(),
        )
        .unwrap();

        assert_eq!(
            result,
            Verification::Mismatch {
                claimed: other.evm_address(),
                recovered: keypair.evm_address(),
            }
        );
    }

    #[test]
    fn test_wrong_validator_address_never_valid() {
        let keypair = test_keypair();
        let proof = OwnershipProof::sign(&keypair.secret_key, test_address()).unwrap();

        // A different validator address changes the claim, so the recovered
        // key (if any) cannot match the claimed EVM address.
        let other_addr = ValidatorAddress::from_bytes([0xC5; 20]);
        match verify_ownership(
            &other_addr,
            proof.evm_address,
            &proof.signature.to_bytes(),
            proof.signature.recovery_id(),
        ) {
            Ok(result) => assert!(!result.is_valid()),
            Err(e) => assert_eq!(e, CryptoError::RecoveryFailed),
        }
    }

    #[test]
    fn test_tampered_signature_never_valid() {
        let keypair = test_keypair();
        let proof = OwnershipProof::sign(&keypair.secret_key, test_address()).unwrap();
        let mut bytes = proof.signature.to_bytes();
        bytes[10] ^= 0x01;

        match verify_ownership(
            &proof.validator_address,
            proof.evm_address,
            &bytes,
            proof.signature.recovery_id(),
        ) {
            Ok(result) => assert!(!result.is_valid()),
            Err(e) => assert!(matches!(
                e,
                CryptoError::MalformedSignature | CryptoError::RecoveryFailed
            )),
        }
    }

    #[test]
    fn test_flipped_recovery_id_never_valid() {
        let keypair = test_keypair();
        let proof = OwnershipProof::sign(&keypair.secret_key, test_address()).unwrap();
        let flipped = proof.signature.recovery_id() ^ 1;

        match verify_ownership(
            &proof.validator_address,
            proof.evm_address,
            &proof.signature.to_bytes(),
            flipped,
        ) {
            Ok(result) => assert!(!result.is_valid()),
            Err(e) => assert_eq!(e, CryptoError::RecoveryFailed),
        }
    }

    #[test]
    fn test_out_of_range_recovery_id_is_rejected() {
        let keypair = test_keypair();
        let proof = OwnershipProof::sign(&keypair.secret_key, test_address()).unwrap();

        let err = verify_ownership(
            &proof.validator_address,
            proof.evm_address,
            &proof.signature.to_bytes(),
            2,
        )
        .unwrap_err();
        assert_eq!(err, CryptoError::InvalidRecoveryId(2));
    }

    #[test]
    fn test_garbage_signature_is_malformed() {
        let err = verify_ownership(&test_address(), Address::ZERO, &[0u8; 64], 0).unwrap_err();
        assert_eq!(err, CryptoError::MalformedSignature);

        let err = verify_ownership(&test_address(), Address::ZERO, &[1u8; 63], 0).unwrap_err();
        assert_eq!(err, CryptoError::MalformedSignature);
    }
}
