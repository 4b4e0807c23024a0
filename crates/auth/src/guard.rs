//! Session guard
//!
//! Owns the one mutable session record. Mutation goes through `&mut
//! self`; everything else borrows. The identity is present exactly when a
//! decodable, unexpired token sits in the credential store.

use std::sync::Arc;

use hrportal_common::{Clock, SystemClock};

use crate::authority::AuthAuthority;
use crate::client::AuthorizationSlot;
use crate::config::AuthConfig;
use crate::error::{AuthFailure, DecodeError};
use crate::jwt::decode_session_token;
use crate::store::CredentialStore;
use crate::types::{Identity, LoginRequest};

/// Read-only view of the session for gating decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus<'a> {
    /// No check has completed yet
    Checking,
    Anonymous,
    Authenticated(&'a Identity),
}

impl<'a> SessionStatus<'a> {
    pub fn identity(&self) -> Option<&'a Identity> {
        match self {
            SessionStatus::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum SessionState {
    Checking,
    Anonymous,
    Authenticated { identity: Identity, token: String },
}

/// Authenticate / verify / clear lifecycle for the portal session.
pub struct SessionGuard {
    config: AuthConfig,
    store: Arc<dyn CredentialStore>,
    authority: Arc<dyn AuthAuthority>,
    clock: Arc<dyn Clock>,
    authorization: AuthorizationSlot,
    state: SessionState,
}

impl SessionGuard {
    pub fn new(
        config: AuthConfig,
        store: Arc<dyn CredentialStore>,
        authority: Arc<dyn AuthAuthority>,
    ) -> Self {
        Self {
            config,
            store,
            authority,
            clock: Arc::new(SystemClock),
            authorization: AuthorizationSlot::new(),
            state: SessionState::Checking,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Share an existing header slot (e.g. one already held by an `ApiClient`).
    pub fn with_authorization(mut self, authorization: AuthorizationSlot) -> Self {
        self.authorization = authorization;
        self
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn authorization(&self) -> &AuthorizationSlot {
        &self.authorization
    }

    pub fn status(&self) -> SessionStatus<'_> {
        match &self.state {
            SessionState::Checking => SessionStatus::Checking,
            SessionState::Anonymous => SessionStatus::Anonymous,
            SessionState::Authenticated { identity, .. } => SessionStatus::Authenticated(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.status().identity()
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// Re-derive the session from the stored token.
    ///
    /// Never fails: an unreadable store counts as no token, and a token
    /// that does not decode or has expired is deleted.
    pub fn check_auth(&mut self) -> bool {
        let stored = match self.store.get(&self.config.token_key) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Credential store read failed, treating as signed out");
                None
            }
        };

        let Some(token) = stored.map(|token| token.trim().to_string()) else {
            self.clear();
            return false;
        };

        match self.decode(&token) {
            Ok(identity) => {
                tracing::debug!(user_id = %identity.id, "Stored session is valid");
                self.establish(identity, token);
                true
            }
            Err(e) => {
                if e.is_expired() {
                    tracing::info!(error = %e, "Stored session expired");
                } else {
                    tracing::warn!(error = %e, "Stored session token rejected");
                }
                self.discard_stored_token();
                self.clear();
                false
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// On failure nothing is stored and the previous state is kept.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Identity, AuthFailure> {
        let request = LoginRequest::new(email, password);

        let token = self.authority.login(&request).await.map_err(|e| {
            tracing::warn!(email = %email, error = %e, "Login failed");
            e
        })?;
        let token = token.trim().to_string();

        let identity = self.decode(&token).map_err(|e| {
            tracing::warn!(email = %email, error = %e, "Login returned an unusable token");
            AuthFailure::InvalidToken(e)
        })?;

        self.store
            .set(&self.config.token_key, &token)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to persist session token");
                AuthFailure::Storage(e.to_string())
            })?;

        tracing::info!(user_id = %identity.id, role = %identity.role, "Session established");
        self.establish(identity.clone(), token);
        Ok(identity)
    }

    /// End the session. Safe to call in any state, any number of times.
    pub fn logout(&mut self) {
        if let Some(identity) = self.identity() {
            tracing::info!(user_id = %identity.id, "Logging out");
        }
        self.discard_stored_token();
        self.clear();
    }

    fn decode(&self, token: &str) -> Result<Identity, DecodeError> {
        decode_session_token(
            token,
            self.config.jwt_secret.as_deref(),
            self.clock.now_secs(),
        )
        .map(|claims| claims.into_identity())
    }

    fn establish(&mut self, identity: Identity, token: String) {
        self.authorization.set(&token);
        self.state = SessionState::Authenticated { identity, token };
    }

    fn clear(&mut self) {
        self.authorization.clear();
        self.state = SessionState::Anonymous;
    }

    fn discard_stored_token(&self) {
        if let Err(e) = self.store.remove(&self.config.token_key) {
            tracing::warn!(error = %e, "Failed to remove stored session token");
        }
    }
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("config", &self.config)
            .field("status", &self.status())
            .finish()
    }
}
