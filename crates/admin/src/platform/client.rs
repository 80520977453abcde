//! Platform API HTTP client.
//!
//! Thin REST plumbing shared by every per-entity call: verb helpers,
//! bearer auth, and status-to-error mapping.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::instrument;

use super::PlatformError;
use crate::config::PlatformApiConfig;

/// Platform API client.
///
/// Cheap to clone; the `reqwest` client and credentials live behind an
/// `Arc`.
#[derive(Clone)]
pub struct PlatformClient {
    inner: Arc<PlatformClientInner>,
}

struct PlatformClientInner {
    client: reqwest::Client,
    /// Base URL without a trailing slash
    base_url: String,
    api_token: SecretString,
}

/// Error body shape the platform uses for non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl PlatformClient {
    /// Create a new platform client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: &PlatformApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(PlatformClientInner {
                client,
                base_url: config.base_url.clone(),
                api_token: config.api_token.clone(),
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.inner.api_token.expose_secret())
    }

    // =========================================================================
    // Verb helpers
    // =========================================================================

    #[instrument(skip(self))]
    pub(super) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, PlatformError> {
        let response = self
            .inner
            .client
            .get(self.url(path))
            .header("Authorization", self.bearer())
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, body))]
    pub(super) async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PlatformError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .header("Authorization", self.bearer())
            .json(body)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, body))]
    pub(super) async fn patch<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PlatformError> {
        let response = self
            .inner
            .client
            .patch(self.url(path))
            .header("Authorization", self.bearer())
            .json(body)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    pub(super) async fn delete(&self, path: &str) -> Result<(), PlatformError> {
        let response = self
            .inner
            .client
            .delete(self.url(path))
            .header("Authorization", self.bearer())
            .send()
            .await?;

        Self::check_status(response).await.map(|_| ())
    }

    // =========================================================================
    // Status mapping
    // =========================================================================

    /// Map non-success statuses to `PlatformError`, passing successful
    /// responses through for body extraction.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PlatformError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(PlatformError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PlatformError::Unauthorized);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PlatformError::NotFound);
        }

        if status == reqwest::StatusCode::CONFLICT {
            return Err(PlatformError::Conflict(Self::error_message(response).await));
        }

        if !status.is_success() {
            return Err(PlatformError::Status {
                status: status.as_u16(),
                message: Self::error_message(response).await,
            });
        }

        Ok(response)
    }

    /// Pull the message out of a `{"error": "..."}` body, falling back to
    /// the raw body text.
    async fn error_message(response: reqwest::Response) -> String {
        let text = response.text().await.unwrap_or_default();
        serde_json::from_str::<ErrorBody>(&text).map_or(text, |body| body.error)
    }
}
