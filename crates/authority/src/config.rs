//! Authority configuration, loaded from the environment

use std::path::PathBuf;

use hrportal_common::config::non_empty_var;
use hrportal_common::{Error, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

#[derive(Clone)]
pub struct AuthorityConfig {
    pub port: u16,
    /// HS256 signing secret
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    /// JSON user list; demo users when unset
    pub users_file: Option<PathBuf>,
    /// `pretty` or `json`
    pub log_format: String,
}

impl std::fmt::Debug for AuthorityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorityConfig")
            .field("port", &self.port)
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("users_file", &self.users_file)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl AuthorityConfig {
    /// Create authority config from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = non_empty_var("AUTHORITY_JWT_SECRET").ok_or_else(|| {
            Error::Configuration("AUTHORITY_JWT_SECRET is required".to_string())
        })?;

        let port = non_empty_var("AUTHORITY_PORT")
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let token_ttl_secs = non_empty_var("AUTHORITY_TOKEN_TTL_SECS")
            .and_then(|ttl| ttl.parse().ok())
            .filter(|ttl: &i64| *ttl > 0)
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        Ok(Self {
            port,
            jwt_secret,
            token_ttl_secs,
            users_file: non_empty_var("AUTHORITY_USERS_FILE").map(PathBuf::from),
            log_format: non_empty_var("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
        })
    }
}
