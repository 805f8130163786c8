//! Compact token decoding.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use sha2::{Digest, Sha256};

use crate::error::AuthError;

/// The three decoded segments of a compact token, plus the digest the signature covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    /// JSON header bytes.
    pub header: Vec<u8>,
    /// JSON claims bytes.
    pub payload: Vec<u8>,
    /// Raw RSA signature.
    pub signature: Vec<u8>,
    /// SHA-256 of `header_segment.payload_segment`, taken over the encoded segments.
    pub signed_digest: [u8; 32],
}

/// Splits `token` on `.` and decodes each segment.
pub fn split(token: &str) -> Result<DecodedToken, AuthError> {
    let segments: Vec<&str> = token.split('.').collect();
    let &[header, payload, signature] = segments.as_slice() else {
        return Err(AuthError::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    let mut hasher = Sha256::new();
    hasher.update(header.as_bytes());
    hasher.update(b".");
    hasher.update(payload.as_bytes());

    Ok(DecodedToken {
        header: decode_segment(header).map_err(|e| malformed("header", e))?,
        payload: decode_segment(payload).map_err(|e| malformed("payload", e))?,
        signature: decode_segment(signature).map_err(|e| malformed("signature", e))?,
        signed_digest: hasher.finalize().into(),
    })
}

/// Decodes base64url, tolerating both padded and unpadded input.
pub(crate) fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    match segment.len() % 4 {
        0 => URL_SAFE.decode(segment),
        rem => {
            let mut padded = String::with_capacity(segment.len() + 4 - rem);
            padded.push_str(segment);
            padded.extend(std::iter::repeat('=').take(4 - rem));
            URL_SAFE.decode(padded)
        }
    }
}

fn malformed(what: &str, err: base64::DecodeError) -> AuthError {
    AuthError::MalformedToken(format!("{what} segment is not base64url: {err}"))
}
