//! Deterministic secp256k1 key derivation from the validator secret
//!
//! The validator's ed25519 seed is stretched through HKDF-SHA256 with a
//! fixed domain-separation context to obtain the secp256k1 secret scalar.
//! The same seed always yields the same scalar, on every platform and in
//! every implementation; that determinism is the cryptographic basis of the
//! ownership link. The context string keeps the derived key unrelated to any
//! other use of the same seed.

use crate::error::CryptoError;
use crate::secp256k1::Secp256k1SecretKey;
use crate::secret::ValidatorSecret;
use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

/// Domain-separation context for the EVM key derivation
pub const DERIVATION_CONTEXT: &[u8] = b"metamask-derivation";

/// Derive the secp256k1 secret key linked to a validator secret.
///
/// HKDF-SHA256 with an empty salt (a zero-filled block per RFC 5869),
/// [`DERIVATION_CONTEXT`] as the info parameter, and a 32-byte output.
pub fn derive_secp256k1_secret(
    secret: &ValidatorSecret,
) -> Result<Secp256k1SecretKey, CryptoError> {
    let hk = Hkdf::<Sha256>::new(None, secret.as_seed());
    let mut okm = [0u8; 32];
    hk.expand(DERIVATION_CONTEXT, &mut okm)
        .map_err(|_| CryptoError::DerivationFailed)?;

    // The output is a valid scalar for all but a ~2^-128 sliver of inputs
    let key = Secp256k1SecretKey::from_bytes(&okm).map_err(|_| CryptoError::DerivationFailed);
    okm.zeroize();
    key
}
