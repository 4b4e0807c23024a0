//! Authority HTTP routes

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AuthorityError;
use crate::extractors::ValidatedJson;
use crate::issuer::TokenIssuer;
use crate::users::UserDirectory;

#[derive(Clone)]
pub struct AuthorityState {
    pub users: Arc<UserDirectory>,
    pub issuer: Arc<TokenIssuer>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginBody {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub id: String,
    pub email: String,
    pub role: String,
    pub expires_at: i64,
}

/// Authority routes; mount under the API prefix (`/api`).
pub fn routes() -> Router<AuthorityState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/health", get(health_check))
}

async fn login(
    State(state): State<AuthorityState>,
    ValidatedJson(body): ValidatedJson<LoginBody>,
) -> Result<Json<LoginResponse>, AuthorityError> {
    let user = state
        .users
        .verify(&body.email, &body.password)
        .ok_or_else(|| {
            tracing::warn!(email = %body.email, "Rejected login");
            AuthorityError::InvalidCredentials
        })?;

    let issued = state.issuer.issue(user)?;
    tracing::info!(user_id = %user.id, role = %user.role, "Issued session token");

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        id: user.id.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
        expires_at: issued.expires_at,
    }))
}

async fn health_check() -> &'static str {
    "OK"
}
