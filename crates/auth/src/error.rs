//! Session errors

use thiserror::Error;

/// Why a stored or freshly issued session token could not be used.
///
/// Every variant collapses the session to anonymous; the distinction
/// only feeds diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token payload has missing or invalid claims: {0}")]
    InvalidClaims(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token expired at {exp} (now {now})")]
    Expired { exp: i64, now: i64 },
}

impl DecodeError {
    pub fn is_expired(&self) -> bool {
        matches!(self, DecodeError::Expired { .. })
    }
}

/// Credential store failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Credential store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential store is corrupt: {0}")]
    Corrupt(String),

    #[error("Credential store lock poisoned")]
    Poisoned,
}

/// Login failure, surfaced to the caller for user-facing display.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("Login rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Login request failed: {0}")]
    Transport(String),

    #[error("Malformed login response: {0}")]
    MalformedResponse(String),

    #[error("Authority issued an unusable token: {0}")]
    InvalidToken(#[from] DecodeError),

    #[error("Could not persist session token: {0}")]
    Storage(String),
}

impl AuthFailure {
    /// Message suitable for showing on the login form.
    pub fn user_message(&self) -> &str {
        match self {
            AuthFailure::Rejected { status: 400 | 401 | 403, .. } => "Invalid email or password",
            AuthFailure::Rejected { .. } => "The sign-in service returned an error",
            AuthFailure::Transport(_) => "Unable to reach the sign-in service",
            AuthFailure::MalformedResponse(_) | AuthFailure::InvalidToken(_) => {
                "The sign-in service returned an unexpected response"
            }
            AuthFailure::Storage(_) => "Unable to save your session on this device",
        }
    }
}

/// Authenticated API call failure
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Request(String),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API response could not be decoded: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let cases = vec![
            (
                AuthFailure::Rejected {
                    status: 401,
                    message: "Bad credentials".to_string(),
                },
                "Invalid email or password",
            ),
            (
                AuthFailure::Rejected {
                    status: 500,
                    message: "boom".to_string(),
                },
                "The sign-in service returned an error",
            ),
            (
                AuthFailure::Transport("connection refused".to_string()),
                "Unable to reach the sign-in service",
            ),
            (
                AuthFailure::MalformedResponse("missing token".to_string()),
                "The sign-in service returned an unexpected response",
            ),
            (
                AuthFailure::InvalidToken(DecodeError::InvalidSignature),
                "The sign-in service returned an unexpected response",
            ),
            (
                AuthFailure::Storage("disk full".to_string()),
                "Unable to save your session on this device",
            ),
        ];

        for (failure, expected) in cases {
            assert_eq!(failure.user_message(), expected);
        }
    }

    #[test]
    fn test_expired_is_distinguishable() {
        assert!(DecodeError::Expired { exp: 1, now: 2 }.is_expired());
        assert!(!DecodeError::Malformed("x".to_string()).is_expired());
        assert!(!DecodeError::InvalidSignature.is_expired());
    }

    #[test]
    fn test_display() {
        let err = AuthFailure::Rejected {
            status: 401,
            message: "Bad credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Login rejected (401): Bad credentials");
        assert_eq!(
            DecodeError::Expired { exp: 10, now: 20 }.to_string(),
            "Token expired at 10 (now 20)"
        );
    }
}
