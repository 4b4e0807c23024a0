//! Authority errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AuthorityError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthorityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthorityError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthorityError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthorityError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthorityError::Validation(_) => "VALIDATION_ERROR",
            AuthorityError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthorityError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AuthorityError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Internal authority error");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
