//! Client-side session core for the HR portal
//!
//! Provides the credential store, session token decoding, the session
//! guard that owns the authenticated identity, the route gate decision,
//! and an API client that carries the session's bearer token.

pub mod authority;
mod claims;
mod client;
mod config;
mod error;
mod gate;
mod guard;
mod jwt;
pub mod store;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use authority::{client::HttpAuthority, mock::MockAuthority, AuthAuthority};
pub use claims::SessionClaims;
pub use client::{ApiClient, AuthorizationSlot};
pub use config::AuthConfig;
pub use error::{ApiError, AuthFailure, DecodeError, StoreError};
pub use gate::{decide, GateDecision, Redirect, RequiredRoles, LOGIN_PATH, UNAUTHORIZED_PATH};
pub use guard::{SessionGuard, SessionStatus};
pub use jwt::decode_session_token;
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use types::{Identity, LoginRequest, Role};
