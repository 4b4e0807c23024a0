//! Authenticated API client
//!
//! `AuthorizationSlot` is the default `Authorization` header shared by
//! every request the portal makes. The session guard fills it when a
//! session is established and empties it on logout.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ApiError;

/// Shared holder of the current bearer token.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationSlot {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthorizationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: &str) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_set(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// `Bearer <token>` header, if a session is established.
    pub fn header_value(&self) -> Option<HeaderValue> {
        let guard = self.token.read().unwrap_or_else(PoisonError::into_inner);
        let token = guard.as_deref()?;
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                Some(value)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Bearer token is not a valid header value");
                None
            }
        }
    }
}

/// HTTP client for the portal's backend API.
///
/// Attaches `Authorization: Bearer <token>` to every request while the
/// slot holds a token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    authorization: AuthorizationSlot,
}

impl ApiClient {
    pub fn new(base_url: &str, authorization: AuthorizationSlot) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization,
        }
    }

    pub fn authorization(&self) -> &AuthorizationSlot {
        &self.authorization
    }

    /// Start a request to `{base_url}{path}` with the current auth header.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.http.request(method, url);
        match self.authorization.header_value() {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
