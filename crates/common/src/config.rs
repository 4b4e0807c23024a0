//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Storage key the session token lives under unless overridden.
pub const DEFAULT_TOKEN_KEY: &str = "hr_system_token";

/// Base URL of the backend API unless overridden.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the backend API (login lives at `{api_url}/auth/login`)
    pub api_url: String,

    /// Credential store key holding the bearer token
    pub token_key: String,

    /// Directory of the file-backed credential store
    pub store_dir: PathBuf,

    /// HS256 secret; when set, session tokens must carry a valid signature
    pub jwt_secret: Option<String>,

    /// Default log filter (`RUST_LOG`)
    pub rust_log: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("token_key", &self.token_key)
            .field("store_dir", &self.store_dir)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let store_dir = match non_empty_var("HRPORTAL_STORE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .map(|home| home.join(".hrportal"))
                .ok_or_else(|| {
                    Error::Configuration(
                        "Cannot find home directory; set HRPORTAL_STORE_DIR".to_string(),
                    )
                })?,
        };

        let api_url = non_empty_var("HRPORTAL_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(Error::Configuration(format!(
                "HRPORTAL_API_URL must be an http(s) URL, got {}",
                api_url
            )));
        }

        let config = Self {
            api_url,
            token_key: non_empty_var("HRPORTAL_AUTH_TOKEN_KEY")
                .unwrap_or_else(|| DEFAULT_TOKEN_KEY.to_string()),
            store_dir,
            jwt_secret: non_empty_var("HRPORTAL_JWT_SECRET"),
            rust_log: non_empty_var("RUST_LOG").unwrap_or_else(|| "hrportal=info".to_string()),
        };

        tracing::debug!(config = ?config, "Configuration loaded");
        Ok(config)
    }
}

/// Read an environment variable, treating an empty value as unset.
pub fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
