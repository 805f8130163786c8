//! Google's published signing keys and their conversion to RSA public keys.

use rsa::{BigUint, RsaPublicKey};
use serde::Deserialize;

use crate::codec::decode_segment;
use crate::error::AuthError;

/// Largest modulus accepted, in bits.
pub const MAX_MODULUS_BITS: usize = 16384;

/// One entry of the provider's key set, as published at
/// [`GOOGLE_CERTS_URL`](crate::certs::GOOGLE_CERTS_URL).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SigningKeyRecord {
    /// Key type, `RSA` for Google.
    pub kty: String,
    /// Signing algorithm, `RS256` for Google.
    pub alg: String,
    /// Intended use, `sig` for Google.
    #[serde(rename = "use")]
    pub key_use: String,
    /// Key id, matched against the token header's `kid`.
    pub kid: String,
    /// Modulus, base64url big-endian.
    pub n: String,
    /// Public exponent, base64url big-endian.
    pub e: String,
}

impl SigningKeyRecord {
    /// Reconstructs the RSA public key described by this record.
    pub fn public_key(&self) -> Result<RsaPublicKey, AuthError> {
        build_public_key(&self.n, &self.e)
    }
}

/// An immutable snapshot of the provider's key set.
///
/// Refreshing keys means building a new `KeySet`; share it between threads
/// behind an `Arc` and swap the `Arc` when a new one is fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KeySet {
    /// Records in published order.
    pub keys: Vec<SigningKeyRecord>,
}

impl KeySet {
    /// Wraps already-parsed records.
    pub fn new(keys: Vec<SigningKeyRecord>) -> Self {
        KeySet { keys }
    }

    /// Parses the JSON document served by the certificate endpoint. Unknown fields are ignored.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AuthError> {
        serde_json::from_slice(bytes).map_err(|e| AuthError::MalformedKeySet(e.to_string()))
    }

    /// Returns the first record whose `kid` equals `kid`.
    pub fn select_key(&self, kid: &str) -> Result<&SigningKeyRecord, AuthError> {
        self.keys
            .iter()
            .find(|key| key.kid == kid)
            .ok_or_else(|| AuthError::KeyNotFound(kid.to_owned()))
    }
}

/// Builds an RSA public key from base64url-encoded modulus and exponent.
///
/// The modulus is read as an arbitrary-precision integer. The exponent is
/// left-padded to 8 bytes and read as a `u64`; anything wider is rejected.
/// Moduli wider than [`MAX_MODULUS_BITS`] are rejected.
pub fn build_public_key(
    modulus_b64: &str,
    exponent_b64: &str,
) -> Result<RsaPublicKey, AuthError> {
    let n = decode_segment(modulus_b64)
        .map_err(|e| AuthError::InvalidKeyMaterial(format!("modulus is not base64url: {e}")))?;
    let e = decode_segment(exponent_b64)
        .map_err(|e| AuthError::InvalidKeyMaterial(format!("exponent is not base64url: {e}")))?;

    if n.iter().all(|&b| b == 0) {
        return Err(AuthError::InvalidKeyMaterial("modulus is zero".into()));
    }
    let exponent = exponent_to_u64(&e).ok_or_else(|| {
        AuthError::InvalidKeyMaterial(format!(
            "exponent does not fit in 64 bits ({} bytes)",
            e.len()
        ))
    })?;

    RsaPublicKey::new_with_max_size(
        BigUint::from_bytes_be(&n),
        BigUint::from(exponent),
        MAX_MODULUS_BITS,
    )
    .map_err(|e| AuthError::InvalidKeyMaterial(e.to_string()))
}

fn exponent_to_u64(bytes: &[u8]) -> Option<u64> {
    let leading_zeros = bytes.iter().take_while(|&&b| b == 0).count();
    let significant = &bytes[leading_zeros..];
    if significant.len() > 8 {
        return None;
    }
    let mut buf = [0u8; 8];
    buf[8 - significant.len()..].copy_from_slice(significant);
    Some(u64::from_be_bytes(buf))
}
