#![warn(missing_docs)]
//!
//! This crate verifies [Google ID tokens](https://developers.google.com/identity/openid-connect/openid-connect#validatinganidtoken)
//! offline: the RS256 signature is checked against Google's published keys and the
//! audience, issuer and lifetime claims are validated. Only the key set needs to be
//! fetched, and only when Google rotates its keys.
//!
//! The crate performs no network I/O. Fetch [`GOOGLE_CERTS_URL`] with your HTTP
//! client of choice and pass the bytes to [`KeySet::from_slice`], or implement
//! [`CertSource`] and let [`Verifier::verify_with_source`] do it.
//!
//! ## Usage
//!
//! ```rust
//! use google_id_token::{KeySet, Verifier};
//!
//! // The body of https://www.googleapis.com/oauth2/v3/certs
//! let certs = br#"{
//!     "keys": [
//!         {
//!             "kty": "RSA",
//!             "alg": "RS256",
//!             "use": "sig",
//!             "kid": "...",
//!             "n": "...",
//!             "e": "AQAB"
//!         }
//!     ]
//! }"#;
//! let key_set = KeySet::from_slice(certs).unwrap();
//!
//! // Your OAuth client id from the Google Cloud console
//! let verifier = Verifier::new("1234567890-abc.apps.googleusercontent.com");
//!
//! // The `credential` posted by Sign In With Google
//! let id_token = "...";
//!
//! match verifier.verify_now(id_token, &key_set) {
//!     Ok(claims) => println!("ID token is valid. sub=<{}>", claims.sub),
//!     Err(err) => println!("Auth error: {:?}", err),
//! }
//! ```
//!
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

pub mod certs;
pub mod claims;
pub mod codec;
mod error;
pub mod jwks;
pub mod signature;

#[cfg(test)]
mod test_support;

pub use certs::{CertSource, GOOGLE_CERTS_URL};
pub use claims::{TokenClaims, TokenHeader, GOOGLE_ISSUERS};
pub use error::AuthError;
pub use jwks::{KeySet, SigningKeyRecord};

/// Verifies `token` against `key_set` and returns its claims.
///
/// Steps run in a fixed order and the first failure is returned unchanged:
/// decode the token, validate audience/issuer/lifetime, look up the signing key
/// by `kid`, rebuild the RSA key, check the signature. The result depends only
/// on the arguments, so `now` (seconds since the Unix epoch) is supplied by the caller.
pub fn verify(
    token: &str,
    key_set: &KeySet,
    expected_audience: &str,
    now: i64,
) -> Result<TokenClaims, AuthError> {
    match verify_token(token, key_set, expected_audience, now) {
        Ok(claims) => {
            debug!(sub = %claims.sub, "verified id token");
            Ok(claims)
        }
        Err(err) => {
            debug!(error = %err, "rejected id token");
            Err(err)
        }
    }
}

fn verify_token(
    token: &str,
    key_set: &KeySet,
    expected_audience: &str,
    now: i64,
) -> Result<TokenClaims, AuthError> {
    let decoded = codec::split(token)?;

    let claims: TokenClaims = serde_json::from_slice(&decoded.payload)
        .map_err(|e| AuthError::MalformedToken(format!("payload: {e}")))?;
    claims::validate_claims(&claims, expected_audience, now)?;

    let header: TokenHeader = serde_json::from_slice(&decoded.header)
        .map_err(|e| AuthError::MalformedToken(format!("header: {e}")))?;
    let record = key_set.select_key(&header.kid)?;
    let key = record.public_key()?;

    signature::verify_signature(&key, &decoded.signed_digest, &decoded.signature)?;
    Ok(claims)
}

/// Verifier is the main entry point you'll be working with. Create with [Verifier::new].
#[derive(Debug, Clone)]
pub struct Verifier {
    client_id: String,
}

impl Verifier {
    /// Creates a [Verifier] that accepts tokens issued to `client_id`, your app's OAuth client id.
    pub fn new(client_id: impl Into<String>) -> Self {
        Verifier {
            client_id: client_id.into(),
        }
    }

    /// The audience tokens must carry.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Verifies `token` at time `now` (seconds since the Unix epoch). See [verify].
    pub fn verify(
        &self,
        token: &str,
        key_set: &KeySet,
        now: i64,
    ) -> Result<TokenClaims, AuthError> {
        verify(token, key_set, &self.client_id, now)
    }

    /// Verifies `token` against the system clock.
    pub fn verify_now(&self, token: &str, key_set: &KeySet) -> Result<TokenClaims, AuthError> {
        self.verify(token, key_set, unix_now())
    }

    /// Fetches a key set from `source` and verifies `token` against it.
    ///
    /// A [AuthError::KeyNotFound] usually means Google rotated its keys since the
    /// source last refreshed, so the key set is fetched once more and verification
    /// is repeated a single time.
    pub fn verify_with_source<S: CertSource + ?Sized>(
        &self,
        token: &str,
        source: &S,
        now: i64,
    ) -> Result<TokenClaims, AuthError> {
        let key_set = certs::fetch_key_set(source)?;
        match self.verify(token, &key_set, now) {
            Err(AuthError::KeyNotFound(kid)) => {
                warn!(%kid, "signing key not in key set, refetching certificates");
                let key_set = certs::fetch_key_set(source)?;
                self.verify(token, &key_set, now)
            }
            result => result,
        }
    }
}

fn unix_now() -> i64 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    i64::try_from(secs).unwrap_or(i64::MAX)
}
