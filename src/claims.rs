//! ID token header and claims, and the checks applied to the claims.

use jsonwebtoken::Algorithm;
use serde::de::{Deserializer, Error as _, Unexpected};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Issuers Google signs ID tokens as. Both forms are in use.
pub const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// The JOSE header of an ID token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenHeader {
    /// Only `RS256` verifies; other known algorithms decode but fail the signature check.
    pub alg: Algorithm,
    /// Identifies the signing key in the [`KeySet`](crate::KeySet).
    pub kid: String,
    /// Media type, `JWT` when present.
    #[serde(default)]
    pub typ: Option<String>,
}

/// The verified payload of a Google ID token.
///
/// `aud`, `iss`, `iat` and `exp` must be present; every other claim defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Google's stable identifier for the user.
    #[serde(default)]
    pub sub: String,
    /// Primary email address.
    #[serde(default)]
    pub email: String,
    /// Whether Google has verified `email`.
    #[serde(default, deserialize_with = "bool_or_string")]
    pub email_verified: bool,
    /// Full display name.
    #[serde(default)]
    pub name: String,
    /// Given name.
    #[serde(default)]
    pub given_name: String,
    /// Family name.
    #[serde(default)]
    pub family_name: String,
    /// Profile picture URL.
    #[serde(default)]
    pub picture: String,
    /// BCP 47 language tag.
    #[serde(default)]
    pub locale: String,
    /// Issuer, one of [`GOOGLE_ISSUERS`].
    pub iss: String,
    /// Authorized party, the client id the token was requested by.
    #[serde(default)]
    pub azp: String,
    /// Audience, the client id the token is intended for.
    pub aud: String,
    /// Issued at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Access token hash, base64url of the left half of its SHA-256.
    #[serde(default)]
    pub at_hash: String,
}

/// Checks audience, then issuer, then `iat <= now <= exp`, stopping at the first failure.
pub fn validate_claims(
    claims: &TokenClaims,
    expected_audience: &str,
    now: i64,
) -> Result<(), AuthError> {
    if claims.aud != expected_audience {
        return Err(AuthError::AudienceMismatch {
            expected: expected_audience.to_owned(),
            found: claims.aud.clone(),
        });
    }

    if !GOOGLE_ISSUERS.contains(&claims.iss.as_str()) {
        return Err(AuthError::IssuerMismatch(claims.iss.clone()));
    }

    if now < claims.iat || now > claims.exp {
        return Err(AuthError::TokenExpired {
            iat: claims.iat,
            exp: claims.exp,
            now,
        });
    }

    Ok(())
}

// Older tokens carry `"email_verified": "true"`.
fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => match s.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(D::Error::invalid_value(
                Unexpected::Str(other),
                &"a boolean",
            )),
        },
    }
}
