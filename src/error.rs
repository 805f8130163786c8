use thiserror::Error;

/// The error type for possible authentication failures when verifying an ID token.
///
/// Every variant is terminal for the verification call that produced it. The
/// core [`verify`](crate::verify) path never produces [`AuthError::MalformedKeySet`]
/// or [`AuthError::CertFetch`]; those come from the [certificate source](crate::certs) layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is not three base64url segments, or a segment is not valid JSON.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The `aud` claim is not the expected client id.
    #[error("token audience {found:?} does not match expected audience {expected:?}")]
    AudienceMismatch {
        /// The client id the verifier was configured with.
        expected: String,
        /// The token's `aud`.
        found: String,
    },

    /// The `iss` claim is not one of the accepted Google issuers.
    #[error("token issuer {0:?} is not trusted")]
    IssuerMismatch(String),

    /// The current time is outside of `iat..=exp`.
    #[error("token is not valid at {now} (issued at {iat}, expires at {exp})")]
    TokenExpired {
        /// The token's `iat`.
        iat: i64,
        /// The token's `exp`.
        exp: i64,
        /// The time verification ran at.
        now: i64,
    },

    /// No key in the key set carries the token's `kid`. Usually means the key set is stale.
    #[error("no key with id {0:?} in key set")]
    KeyNotFound(String),

    /// The matching key record could not be turned into an RSA public key.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// RSASSA-PKCS1-v1_5 verification failed.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The fetched certificate document is not a key set.
    #[error("malformed key set: {0}")]
    MalformedKeySet(String),

    /// The certificate source failed to deliver the key set.
    #[error("failed to fetch certificates: {0}")]
    CertFetch(String),
}
