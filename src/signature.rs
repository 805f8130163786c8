//! RS256 signature checks.

use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha2::Sha256;

use crate::error::AuthError;

/// RSASSA-PKCS1-v1_5 verification of a SHA-256 digest.
///
/// `signed_digest` is the already-hashed signing input, as produced by
/// [`codec::split`](crate::codec::split).
pub fn verify_signature(
    key: &RsaPublicKey,
    signed_digest: &[u8],
    signature: &[u8],
) -> Result<(), AuthError> {
    key.verify(Pkcs1v15Sign::new::<Sha256>(), signed_digest, signature)
        .map_err(|_| AuthError::InvalidSignature)
}
