//! Session token claims

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DecodeError;
use crate::types::{Identity, Role};

/// Claims carried by a session token issued by the login authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Email
    pub email: String,
    /// Display name
    pub name: String,
    /// Role tag, e.g. `ADMIN`
    pub role: String,
    /// Expires at (seconds since epoch)
    #[serde(deserialize_with = "numeric_date")]
    pub exp: i64,
    /// Issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// NumericDate may be fractional. Rounding up keeps `exp <= now` exact for
/// whole-second `now`.
fn numeric_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let exp = f64::deserialize(deserializer)?;
    Ok(exp.ceil() as i64)
}

impl SessionClaims {
    /// Reject payloads that deserialized but cannot identify a user.
    pub(crate) fn validate(self) -> Result<Self, DecodeError> {
        if self.sub.trim().is_empty() {
            return Err(DecodeError::InvalidClaims("empty `sub`".to_string()));
        }
        if self.role.trim().is_empty() {
            return Err(DecodeError::InvalidClaims("empty `role`".to_string()));
        }
        Ok(self)
    }

    pub fn into_identity(self) -> Identity {
        Identity {
            id: self.sub,
            email: self.email,
            name: self.name,
            role: Role::new(self.role),
        }
    }
}
