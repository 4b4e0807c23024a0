//! Login authority
//!
//! Credential verification is delegated to an external authority that
//! answers `POST {api_url}/auth/login` with a bearer token.
//! - `client::HttpAuthority` talks to the real endpoint
//! - `mock::MockAuthority` answers from an in-memory table for tests

pub mod client;
pub mod mock;

use crate::error::AuthFailure;
use crate::types::LoginRequest;

/// Verifies credentials and issues a session token.
#[async_trait::async_trait]
pub trait AuthAuthority: Send + Sync {
    /// Exchange credentials for a bearer token.
    async fn login(&self, request: &LoginRequest) -> Result<String, AuthFailure>;
}
