//! Session token issuer

use std::sync::Arc;

use hrportal_auth::SessionClaims;
use hrportal_common::{Clock, SystemClock};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::error::AuthorityError;
use crate::users::DirectoryUser;

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Seconds since epoch
    pub expires_at: i64,
}

/// Signs HS256 session tokens carrying `sub, email, name, role, iat, exp`.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn issue(&self, user: &DirectoryUser) -> Result<IssuedToken, AuthorityError> {
        let now = self.clock.now_secs();
        let claims = SessionClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            exp: now + self.ttl_secs,
            iat: Some(now),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthorityError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }
}
