//! Shared fixtures: a fixed 2048-bit RSA key and a token minter.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rsa::{BigUint, Pkcs1v15Sign, RsaPrivateKey};
use sha2::{Digest, Sha256};

use crate::jwks::{KeySet, SigningKeyRecord};

// Generated using https://mkjwk.org/
pub const KID: &str = "r50vKukJl4oVaT78O0ELIGS4w8ynMY_4lRSBq-uvTX4";

pub const PUB_N: &str = "rJGYlYJPZZmeZUyxtEdbbzyMZrBbJPMbhkaioazk6_43d9SIYcVWouei6R5WXQrO6chx3HaSUOqRcYv4oF9x6FVrBWSGyxbzjltcnwKOWn3K8qmJWQvv2nLvLJvf_wdUR2IlH2SfGEE9Om6mJG6tw4Hvn0FauCvnS_a5E5oi0-Mp8rDK3KaHKTr7YHPNzKZzYryF8Ids2mb7PULxFNErIUmB6yTuxUjmbLXwRK2nHe2gHnaepYqcTZIQcTgfS8NeAqKUHWwRkvqmi_pIr9g8azwCqQ8cHpaOoxyUtTlSva1ggkiinJdeIP1-RF-ElflqGtqLXF9OJc8Kcd1ivIaEaQ";

const PRIV_D: &str = "J_qnHeQNnt0jDBbjiH-LmE6vvE6ZHwtPUiFlJg2XD3FaymEro3MDakQ9wsIrgeyyGQk-D7RMm4BsZ6Dk3cqe6hN38sziSYSssktKPvBpqF9COEu8rSuNys8bx_rovv2ksdD0BrzZ-tWKaNIfnYsiqIuexwduDALn1_p10CvCa9HvY9Z_wcuW4hazdMDXZhQIDexldd6hpdB4XgIftqmvrMV7uTCENcLrZ_daJO_dKugybin828asAjXzua2sNCD3QYKmWVR65p-4PBDBKPFWyEuV3C2zpPE_rBex-B1iOwKwlF_-UPMSpPbaGzgyB2Nl4k1UQ7CZBMWswFnS6FnJ_Q";
const PRIV_P: &str = "9WRlEysjzbea25MPFvMMioGvShW4vZD0Qhhc4yVRZz0PpRXpW5wVQKMJqd1N7vfiXA_OMtGY3pTMegUhF_Mw7W2S1b0_2V_xAXYt8g4G0IY0aT9GBETB63ga4FLccJCSkjIagtt5TOhO5IOIDboghEKkQvguNTSJPi3J5Dvp_PM";
const PRIV_Q: &str = "tAdPC8Yo08Cb951vkfWmjZyJuosjRHcWugvrVivnuWVyHouuX9ktbE-JRREhQ7o-58EXJZJ_el07_IE1xKoKlaJ3saEOfWDOApDiJxbbwwnMGCTqdsi8Q07DN4PgYFcSr5MXd9ZFemqVBXW84yFKVXPNKXfR_VoI9GlURQU6YDM";

/// The fixture key as a public JWK, in the shape Google publishes.
pub const PUB_JWK: &str = r#"{
    "kty": "RSA",
    "e": "AQAB",
    "use": "sig",
    "kid": "r50vKukJl4oVaT78O0ELIGS4w8ynMY_4lRSBq-uvTX4",
    "alg": "RS256",
    "n": "rJGYlYJPZZmeZUyxtEdbbzyMZrBbJPMbhkaioazk6_43d9SIYcVWouei6R5WXQrO6chx3HaSUOqRcYv4oF9x6FVrBWSGyxbzjltcnwKOWn3K8qmJWQvv2nLvLJvf_wdUR2IlH2SfGEE9Om6mJG6tw4Hvn0FauCvnS_a5E5oi0-Mp8rDK3KaHKTr7YHPNzKZzYryF8Ids2mb7PULxFNErIUmB6yTuxUjmbLXwRK2nHe2gHnaepYqcTZIQcTgfS8NeAqKUHWwRkvqmi_pIr9g8azwCqQ8cHpaOoxyUtTlSva1ggkiinJdeIP1-RF-ElflqGtqLXF9OJc8Kcd1ivIaEaQ"
}"#;

fn uint(b64: &str) -> BigUint {
    BigUint::from_bytes_be(&URL_SAFE_NO_PAD.decode(b64).unwrap())
}

pub fn private_key() -> RsaPrivateKey {
    RsaPrivateKey::from_components(
        uint(PUB_N),
        BigUint::from(65537u32),
        uint(PRIV_D),
        vec![uint(PRIV_P), uint(PRIV_Q)],
    )
    .unwrap()
}

pub fn sign_digest(key: &RsaPrivateKey, digest: &[u8]) -> Vec<u8> {
    key.sign(Pkcs1v15Sign::new::<Sha256>(), digest).unwrap()
}

pub fn fixture_record() -> SigningKeyRecord {
    SigningKeyRecord {
        kty: "RSA".into(),
        alg: "RS256".into(),
        key_use: "sig".into(),
        kid: KID.into(),
        n: PUB_N.into(),
        e: "AQAB".into(),
    }
}

pub fn fixture_key_set() -> KeySet {
    KeySet::new(vec![fixture_record()])
}

/// Signs `payload` as an RS256 token with the fixture key under header `kid`.
pub fn mint(kid: &str, payload: &serde_json::Value) -> String {
    let header = serde_json::json!({ "alg": "RS256", "kid": kid, "typ": "JWT" });
    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(payload.to_string())
    );
    let sig = sign_digest(&private_key(), &Sha256::digest(signing_input.as_bytes()));
    format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(sig))
}

pub fn google_payload() -> serde_json::Value {
    serde_json::json!({
        "iss": "accounts.google.com",
        "azp": "client-123",
        "aud": "client-123",
        "sub": "110169484474386276334",
        "email": "user@example.com",
        "email_verified": true,
        "at_hash": "HK6E_P6Dh8Y93mRNtsDB1Q",
        "name": "Test User",
        "picture": "https://lh3.googleusercontent.com/a/photo.jpg",
        "given_name": "Test",
        "family_name": "User",
        "locale": "en",
        "iat": 1000,
        "exp": 2000
    })
}
