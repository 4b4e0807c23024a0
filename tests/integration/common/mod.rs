//! Common test utilities for integration tests
//!
//! Spawns the development authority on an ephemeral port and builds
//! portal sessions pointed at it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::{http::HeaderMap, routing::get, Json, Router};
use hrportal_app::{create_authority_app, PortalSession};
use hrportal_auth::SessionClaims;
use hrportal_authority::{AuthorityState, TokenIssuer, UserDirectory};
use hrportal_common::Config;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::task::JoinHandle;

pub const TEST_SECRET: &str = "integration-test-secret";

pub const ADMIN: (&str, &str) = ("admin@hrportal.local", "admin123");
pub const HR_ADMIN: (&str, &str) = ("hr@hrportal.local", "hr123");
pub const EMPLOYEE: (&str, &str) = ("employee@hrportal.local", "employee123");

/// Running authority plus a private credential store directory.
pub struct TestAuthority {
    pub addr: SocketAddr,
    pub store_dir: TempDir,
    server: JoinHandle<()>,
}

impl TestAuthority {
    /// Serve the demo directory with a one hour token lifetime.
    pub async fn spawn() -> Result<Self> {
        let state = AuthorityState {
            users: Arc::new(UserDirectory::demo()?),
            issuer: Arc::new(TokenIssuer::new(TEST_SECRET, 3600)),
        };

        // `/api/whoami` echoes the bearer header so tests can see what the client sent.
        let app = create_authority_app(state).route("/api/whoami", get(echo_authorization));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Test authority stopped");
            }
        });

        Ok(Self {
            addr,
            store_dir: tempfile::tempdir()?,
            server,
        })
    }

    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn config(&self) -> Config {
        self.config_for(self.store_dir.path())
    }

    pub fn config_for(&self, store_dir: &Path) -> Config {
        Config {
            api_url: self.api_url(),
            token_key: "hr_system_token".to_string(),
            store_dir: store_dir.to_path_buf(),
            jwt_secret: Some(TEST_SECRET.to_string()),
            rust_log: "debug".to_string(),
        }
    }

    /// A fresh session over the shared store directory, as a new process would see it.
    pub fn session(&self) -> PortalSession {
        PortalSession::from_config(&self.config())
    }
}

impl Drop for TestAuthority {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn echo_authorization(headers: HeaderMap) -> Json<Value> {
    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    Json(json!({ "authorization": authorization }))
}

/// Sign a token with the test secret.
pub fn mint(role: &str, exp: i64) -> String {
    let claims = SessionClaims {
        sub: "u-minted".to_string(),
        email: "minted@hrportal.local".to_string(),
        name: "Minted".to_string(),
        role: role.to_string(),
        exp,
        iat: None,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("test token must encode")
}

pub fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}
