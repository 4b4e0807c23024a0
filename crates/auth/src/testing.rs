//! Fixture helpers shared by unit tests

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::claims::SessionClaims;

pub(crate) const TEST_SECRET: &str = "test-session-secret";
pub(crate) const NOW: i64 = 1_700_000_000;

pub(crate) fn claims_expiring_at(exp: i64) -> SessionClaims {
    SessionClaims {
        sub: "u1".to_string(),
        email: "a@x.com".to_string(),
        name: "A".to_string(),
        role: "ADMIN".to_string(),
        exp,
        iat: Some(NOW - 60),
    }
}

pub(crate) fn mint<T: Serialize>(claims: &T) -> String {
    mint_with_secret(claims, TEST_SECRET)
}

pub(crate) fn mint_with_secret<T: Serialize>(claims: &T, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to encode JWT")
}
