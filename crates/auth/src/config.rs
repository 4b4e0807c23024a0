//! Session configuration

use hrportal_common::config::{Config, DEFAULT_TOKEN_KEY};

/// Session configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Base URL of the backend API
    pub api_url: String,
    /// Credential store key for the bearer token
    pub token_key: String,
    /// HS256 secret; `None` decodes tokens without verifying the signature
    pub jwt_secret: Option<String>,
}

impl AuthConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            jwt_secret: None,
        }
    }

    pub fn with_token_key(mut self, token_key: impl Into<String>) -> Self {
        self.token_key = token_key.into();
        self
    }

    pub fn with_jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        Self {
            api_url: config.api_url.clone(),
            token_key: config.token_key.clone(),
            jwt_secret: config.jwt_secret.clone(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_url", &self.api_url)
            .field("token_key", &self.token_key)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
