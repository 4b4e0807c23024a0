//! HTTP login authority client
//!
//! POSTs credentials as JSON to `{api_url}/auth/login` and reads the
//! `token` field of the response.

use serde::Deserialize;
use serde_json::Value;

use crate::authority::AuthAuthority;
use crate::error::AuthFailure;
use crate::types::LoginRequest;

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Login authority reached over HTTP.
pub struct HttpAuthority {
    http: reqwest::Client,
    login_url: String,
}

impl HttpAuthority {
    pub fn new(api_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(http: reqwest::Client, api_url: &str) -> Self {
        Self {
            http,
            login_url: format!("{}/auth/login", api_url.trim_end_matches('/')),
        }
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

#[async_trait::async_trait]
impl AuthAuthority for HttpAuthority {
    async fn login(&self, request: &LoginRequest) -> Result<String, AuthFailure> {
        let response = self
            .http
            .post(&self.login_url)
            .json(request)
            .send()
            .await
            .map_err(|e| AuthFailure::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthFailure::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthFailure::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Login failed").to_string()),
            });
        }

        let parsed: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| AuthFailure::MalformedResponse(e.to_string()))?;

        if parsed.token.trim().is_empty() {
            return Err(AuthFailure::MalformedResponse("empty token".to_string()));
        }

        tracing::debug!(url = %self.login_url, "Login authority issued a token");
        Ok(parsed.token)
    }
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"error": {"message": ..}}`, `{"message": ..}` and
/// `{"error": ".."}`.
fn rejection_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = value
        .pointer("/error/message")
        .or_else(|| value.get("message"))
        .or_else(|| value.get("error").filter(|e| e.is_string()))?;
    message.as_str().map(str::to_string)
}
