//! HR portal application composition root
//!
//! Wires the session core to concrete adapters (file credential store,
//! HTTP login authority, shared authorization header) and composes the
//! development authority router.

pub mod navigator;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use hrportal_auth::{
    ApiClient, AuthConfig, AuthorizationSlot, FileCredentialStore, HttpAuthority, SessionGuard,
};
use hrportal_authority::AuthorityState;
use hrportal_common::config::non_empty_var;
use hrportal_common::Config;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

pub use navigator::{Navigation, Navigator};
pub use routes::{Access, MenuItem, Page, PortalRoute, RouteTable, DEFAULT_LANDING};

/// Portal session wired to the configured backend.
pub struct PortalSession {
    pub guard: SessionGuard,
    pub api: ApiClient,
    pub navigator: Navigator,
}

impl PortalSession {
    /// Build the guard, API client and navigator from `config`.
    ///
    /// The guard and the API client share one authorization slot, so a
    /// login or logout is visible to every later API request.
    pub fn from_config(config: &Config) -> Self {
        let authorization = AuthorizationSlot::new();
        let store = FileCredentialStore::new(&config.store_dir);
        let authority = HttpAuthority::new(&config.api_url);

        tracing::debug!(
            store = %store.path().display(),
            login_url = %authority.login_url(),
            "Wiring portal session"
        );

        let guard = SessionGuard::new(
            AuthConfig::from(config),
            Arc::new(store),
            Arc::new(authority),
        )
        .with_authorization(authorization.clone());

        Self {
            guard,
            api: ApiClient::new(&config.api_url, authorization),
            navigator: Navigator::new(RouteTable::portal()),
        }
    }
}

/// Create the authority router: API routes under `/api` plus a root health check.
pub fn create_authority_app(state: AuthorityState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .nest("/api", hrportal_authority::routes().with_state(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .into_inner(),
        )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`; anything but `json` is pretty.
    pub fn from_env() -> Self {
        non_empty_var("LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or(LogFormat::Pretty)
    }

    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Install the global subscriber. Logs go to stderr; `RUST_LOG` wins over
/// `default_filter`.
pub fn init_tracing(format: LogFormat, default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use hrportal_authority::{TokenIssuer, UserDirectory};
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn state() -> AuthorityState {
        AuthorityState {
            users: Arc::new(UserDirectory::demo().unwrap()),
            issuer: Arc::new(TokenIssuer::new("app-test", 60)),
        }
    }

    #[tokio::test]
    async fn test_health_at_root_and_under_api() {
        for uri in ["/health", "/api/health"] {
            let response = create_authority_app(state())
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_login_is_not_served_at_root() {
        let response = create_authority_app(state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/login")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"email":"a@x.com","password":"p"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_portal_session_shares_authorization() {
        use hrportal_auth::CredentialStore;
        use jsonwebtoken::{encode, EncodingKey, Header};

        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            api_url: "http://localhost:8080/api".to_string(),
            token_key: "hr_system_token".to_string(),
            store_dir: PathBuf::from(dir.path()),
            jwt_secret: None,
            rust_log: "info".to_string(),
        };

        let mut session = PortalSession::from_config(&config);
        assert!(!session.guard.check_auth());
        assert!(!session.api.authorization().is_set());
        assert_eq!(session.navigator.current(), "/");

        let exp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
            + 3600;
        let token = encode(
            &Header::default(),
            &serde_json::json!({"sub": "u1", "email": "a@x.com", "name": "A", "role": "ADMIN", "exp": exp}),
            &EncodingKey::from_secret(b"any"),
        )
        .unwrap();
        FileCredentialStore::new(dir.path())
            .set("hr_system_token", &token)
            .unwrap();

        assert!(session.guard.check_auth());
        assert!(session.api.authorization().is_set());

        session.guard.logout();
        assert!(!session.api.authorization().is_set());
    }

    #[test]
    #[serial_test::serial]
    fn test_log_format_from_env() {
        std::env::remove_var("LOG_FORMAT");
        assert_eq!(LogFormat::from_env(), LogFormat::Pretty);

        std::env::set_var("LOG_FORMAT", "json");
        assert_eq!(LogFormat::from_env(), LogFormat::Json);

        std::env::remove_var("LOG_FORMAT");
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Pretty);
    }
}
