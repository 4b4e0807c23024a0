//! HR portal CLI (`hrportal`)
//!
//! Drives the portal session from a terminal: sign in, inspect the
//! session, walk the route table, and call the backend API with the
//! session's bearer token.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use hrportal_app::{init_tracing, LogFormat, Navigation, PortalSession};
use hrportal_common::Config;

#[derive(Parser)]
#[command(name = "hrportal")]
#[command(author, version, about = "HR portal session client", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "HRPORTAL_PASSWORD", hide_env_values = true)]
        password: String,

        /// Page to continue to after signing in
        #[arg(long)]
        next: Option<String>,
    },

    /// Show the signed-in user
    Whoami,

    /// Navigate to a portal page through the route gate
    Open { path: String },

    /// Sign out and forget the stored token
    Logout,

    /// List portal routes and whether the current session may open them
    Routes,

    /// GET a backend API path with the session's bearer token
    Fetch { path: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(LogFormat::from_env(), &config.rust_log);

    let mut session = PortalSession::from_config(&config);

    match cli.command {
        Commands::Login {
            email,
            password,
            next,
        } => {
            if let Some(next) = next {
                session.navigator.remember_return(&next);
            }
            match session
                .navigator
                .login(&mut session.guard, &email, &password)
                .await
            {
                Ok(outcome) => {
                    let identity = session.guard.identity();
                    let value = json!({ "identity": identity, "navigation": outcome });
                    print_output(cli.format, &value, || {
                        let who = identity
                            .map(|identity| format!("{} ({})", identity.email, identity.role))
                            .unwrap_or_default();
                        format!("Signed in as {}\n{}", who, describe(&outcome))
                    })?;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Login failed");
                    anyhow::bail!("{}", e.user_message());
                }
            }
        }

        Commands::Whoami => {
            session.guard.check_auth();
            let identity = session.guard.identity();
            print_output(cli.format, &json!({ "identity": identity }), || match identity {
                Some(identity) => format!(
                    "{} <{}>\nid:   {}\nrole: {}",
                    identity.name, identity.email, identity.id, identity.role
                ),
                None => "Not signed in".to_string(),
            })?;
        }

        Commands::Open { path } => {
            let outcome = session.navigator.navigate(&mut session.guard, &path);
            print_output(cli.format, &json!(outcome), || describe(&outcome))?;
        }

        Commands::Logout => {
            let outcome = session.navigator.logout(&mut session.guard);
            print_output(cli.format, &json!({ "navigation": outcome }), || {
                "Signed out".to_string()
            })?;
        }

        Commands::Routes => {
            session.guard.check_auth();
            let status = session.guard.status();
            let rows: Vec<_> = session
                .navigator
                .routes()
                .routes()
                .iter()
                .map(|route| {
                    json!({
                        "path": route.path,
                        "page": route.page,
                        "title": route.page.title(),
                        "access": route.preview(status),
                    })
                })
                .collect();
            print_output(cli.format, &json!(rows), || {
                rows.iter()
                    .map(|row| {
                        format!(
                            "{:<14} {:<16} {}",
                            row["path"].as_str().unwrap_or_default(),
                            row["title"].as_str().unwrap_or_default(),
                            row["access"].as_str().unwrap_or_default()
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }

        Commands::Fetch { path } => {
            session.guard.check_auth();
            let body: serde_json::Value = session
                .api
                .get_json(&path)
                .await
                .with_context(|| format!("GET {} failed", path))?;
            print_output(cli.format, &body, || {
                serde_json::to_string_pretty(&body).unwrap_or_default()
            })?;
        }
    }

    Ok(())
}

fn describe(outcome: &Navigation) -> String {
    match outcome {
        Navigation::Rendered { path, page } => format!("{} -> {}", path, page.title()),
        Navigation::Loading { path } => format!("{} -> loading", path),
        Navigation::Redirected {
            requested,
            to,
            page,
        } => format!("{} -> redirected to {} ({})", requested, to, page.title()),
    }
}

fn print_output(
    format: OutputFormat,
    value: &serde_json::Value,
    text: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{}", text()),
    }
    Ok(())
}
