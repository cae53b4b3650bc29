//! REST client for the Oscar backend.
//!
//! # Responsibilities
//! - Build URLs against the configured API base
//! - Attach `Authorization: Token <t>` and locale/currency headers
//! - Map transport and status failures into [`ClientError`]
//! - Honor cancellation tokens on catalog fetches
//!
//! # Design Decisions
//! - One shared `reqwest::Client` per [`ApiClient`] for pool reuse.
//! - A 401 on any authenticated call surfaces as
//!   [`ClientError::Unauthorized`] so the caller can drop credentials.
//! - Cancellation races the in-flight request against the token; a
//!   cancelled fetch is reported as [`ClientError::Cancelled`], never
//!   as an ordinary failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::client::catalog::{CatalogKey, Paginated, Product};

/// Failures surfaced by the backend client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The fetch was cancelled before a response was applied.
    #[error("request cancelled")]
    Cancelled,

    /// Transport-level failure (connect, timeout, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// The backend answered with a non-success status.
    #[error("api error ({status}): {detail}")]
    Api { status: u16, detail: String },
}

/// Successful login payload from the backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Minimal account identity stored alongside the token.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Account profile, including the server-side preference fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserProfile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Preferred UI language, e.g. "en" or "zh-hans".
    #[serde(default)]
    pub language: Option<String>,
    /// Preferred display currency, e.g. "USD".
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub newsletter: Option<bool>,
}

/// Client for the Oscar REST API.
pub struct ApiClient {
    base: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client against the given API base URL.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client reusing an existing connection pool.
    pub fn with_client(base: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    /// Exchange credentials for an auth token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/login/"))
            .json(&serde_json::json!({ "username": email, "password": password }))
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => Ok(response.json().await?),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::BAD_REQUEST => {
                Err(ClientError::Unauthorized)
            }
            s => Err(ClientError::Api {
                status: s.as_u16(),
                detail: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Fetch the profile of the token's account.
    ///
    /// A 401 means the token is no longer valid; callers are expected
    /// to clear their stored credentials on that path.
    pub async fn fetch_profile(&self, token: &str) -> Result<UserProfile, ClientError> {
        let response = self
            .http
            .get(self.url("/profile/"))
            .header("Authorization", format!("Token {token}"))
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => Ok(response.json().await?),
            reqwest::StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            s => Err(ClientError::Api {
                status: s.as_u16(),
                detail: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Update profile fields (preferences, contact details).
    pub async fn update_profile(
        &self,
        token: &str,
        patch: &serde_json::Value,
    ) -> Result<UserProfile, ClientError> {
        let response = self
            .http
            .put(self.url("/profile/"))
            .header("Authorization", format!("Token {token}"))
            .json(patch)
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => Ok(response.json().await?),
            reqwest::StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            s => Err(ClientError::Api {
                status: s.as_u16(),
                detail: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Fetch one catalog page, racing the request against `cancel`.
    pub async fn products(
        &self,
        key: &CatalogKey,
        cancel: &CancellationToken,
    ) -> Result<Paginated<Product>, ClientError> {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let path = match &key.category {
            Some(slug) => format!("/prodcat/{slug}/"),
            None => "/products/".to_string(),
        };

        let request = self
            .http
            .get(self.url(&path))
            .query(&[("page", key.page.to_string())])
            .header("Accept-Language", key.locale.as_str())
            .header("X-Currency", key.currency.as_str());

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            result = request.send() => result?,
        };

        if !response.status().is_success() {
            return Err(ClientError::Api {
                status: response.status().as_u16(),
                detail: response.text().await.unwrap_or_default(),
            });
        }

        let page = tokio::select! {
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            body = response.json::<Paginated<Product>>() => body?,
        };

        Ok(page)
    }

    /// Fetch a single product by id.
    pub async fn product(
        &self,
        id: i64,
        key: &CatalogKey,
        cancel: &CancellationToken,
    ) -> Result<Product, ClientError> {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let request = self
            .http
            .get(self.url(&format!("/products/{id}/")))
            .header("Accept-Language", key.locale.as_str())
            .header("X-Currency", key.currency.as_str());

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            result = request.send() => result?,
        };

        match response.status() {
            s if s.is_success() => Ok(response.json().await?),
            s => Err(ClientError::Api {
                status: s.as_u16(),
                detail: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// The configured API base (for diagnostics).
    pub fn base(&self) -> &str {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_doubled_slashes() {
        let client = ApiClient::new("http://localhost:9999/api/");
        assert_eq!(client.url("/products/"), "http://localhost:9999/api/products/");
        assert_eq!(client.url("profile/"), "http://localhost:9999/api/profile/");
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits_before_dispatch() {
        let client = ApiClient::new("http://localhost:1");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let key = CatalogKey::default();
        let result = client.products(&key, &cancel).await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
    }
}
