// HR Portal - Development Login Authority

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};

use hrportal_app::{create_authority_app, init_tracing, LogFormat};
use hrportal_authority::{AuthorityConfig, AuthorityState, TokenIssuer, UserDirectory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AuthorityConfig::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    init_tracing(LogFormat::parse(&config.log_format), "info");

    info!(config = ?config, "Starting HR portal login authority");

    let users = match &config.users_file {
        Some(path) => UserDirectory::from_file(path).map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to load user directory");
            e
        })?,
        None => {
            info!("AUTHORITY_USERS_FILE not set, serving demo users");
            UserDirectory::demo()?
        }
    };

    info!(users = users.len(), "User directory loaded");

    let state = AuthorityState {
        users: Arc::new(users),
        issuer: Arc::new(TokenIssuer::new(&config.jwt_secret, config.token_ttl_secs)),
    };

    let app = create_authority_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Login endpoint available at http://{}/api/auth/login", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
