//! Mock Login Authority
//!
//! Answers logins from an in-memory credential table and records every
//! attempted email for test assertions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::authority::AuthAuthority;
use crate::error::AuthFailure;
use crate::types::LoginRequest;

#[derive(Debug, Clone)]
struct Account {
    password: String,
    token: String,
}

/// Mock authority that accepts only the accounts it was seeded with.
#[derive(Debug, Clone, Default)]
pub struct MockAuthority {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    attempts: Arc<Mutex<Vec<String>>>,
    outage: Arc<Mutex<Option<AuthFailure>>>,
}

impl MockAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account: `email`/`password` logs in and receives `token`.
    pub fn with_account(self, email: &str, password: &str, token: &str) -> Self {
        self.accounts
            .lock()
            .expect("accounts lock poisoned — prior test panicked")
            .insert(
                email.to_string(),
                Account {
                    password: password.to_string(),
                    token: token.to_string(),
                },
            );
        self
    }

    /// Make every subsequent login fail with `failure`.
    pub fn fail_with(&self, failure: AuthFailure) {
        *self
            .outage
            .lock()
            .expect("outage lock poisoned — prior test panicked") = Some(failure);
    }

    /// Emails of all login attempts, in order.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts
            .lock()
            .expect("attempts lock poisoned — prior test panicked")
            .clone()
    }
}

#[async_trait::async_trait]
impl AuthAuthority for MockAuthority {
    async fn login(&self, request: &LoginRequest) -> Result<String, AuthFailure> {
        tracing::debug!(email = %request.email, "Mock authority: login attempt");

        self.attempts
            .lock()
            .map_err(|e| AuthFailure::Transport(format!("attempts lock poisoned: {e}")))?
            .push(request.email.clone());

        if let Some(failure) = self
            .outage
            .lock()
            .map_err(|e| AuthFailure::Transport(format!("outage lock poisoned: {e}")))?
            .clone()
        {
            return Err(failure);
        }

        let accounts = self
            .accounts
            .lock()
            .map_err(|e| AuthFailure::Transport(format!("accounts lock poisoned: {e}")))?;

        match accounts.get(&request.email) {
            Some(account) if account.password == request.password => Ok(account.token.clone()),
            _ => Err(AuthFailure::Rejected {
                status: 401,
                message: "Invalid email or password".to_string(),
            }),
        }
    }
}
