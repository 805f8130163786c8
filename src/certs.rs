//! Where key sets come from.
//!
//! The crate performs no network I/O. A relying service supplies a [`CertSource`]
//! that retrieves [`GOOGLE_CERTS_URL`] with whatever HTTP client it already uses,
//! and either parses the bytes itself with [`KeySet::from_slice`] or hands the
//! source to [`Verifier::verify_with_source`](crate::Verifier::verify_with_source).

use crate::error::AuthError;
use crate::jwks::KeySet;

/// Google's JWK endpoint for ID token signing keys.
pub const GOOGLE_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// A capability that returns the raw key set document.
///
/// Transport, timeouts and caching are the implementor's concern.
pub trait CertSource {
    /// Returns the body of the certificate endpoint.
    fn fetch_certs(&self) -> Result<Vec<u8>, AuthError>;
}

impl<F> CertSource for F
where
    F: Fn() -> Result<Vec<u8>, String>,
{
    fn fetch_certs(&self) -> Result<Vec<u8>, AuthError> {
        self().map_err(AuthError::CertFetch)
    }
}

/// Fetches and parses a fresh key set.
pub fn fetch_key_set<S: CertSource + ?Sized>(source: &S) -> Result<KeySet, AuthError> {
    let bytes = source.fetch_certs()?;
    KeySet::from_slice(&bytes)
}
