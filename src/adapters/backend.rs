//! HTTP client for the backend content API.
//!
//! The listing endpoint returns `{ "data": [...] }` with no pagination
//! contract. Deletes are surfaced to the caller on any non-success status,
//! never retried here.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ContentRecord;

/// Errors from the backend API
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend returned status {status} for {operation}")]
    Status { operation: &'static str, status: u16 },

    #[error("Failed to parse backend response: {0}")]
    Parse(#[source] reqwest::Error),
}

/// Backend content API surface consumed by the library
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Fetch the full content listing (unordered as far as the contract goes)
    async fn list_content(&self) -> Result<Vec<ContentRecord>, BackendError>;

    /// Delete a record by id
    async fn delete_content(&self, id: &str) -> Result<(), BackendError>;

    /// Check backend health
    async fn health(&self) -> Result<HealthStatus, BackendError>;
}

/// Health endpoint payload
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

/// Listing envelope: `{ "data": [...] }`
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    data: Vec<ContentRecord>,
}

/// reqwest-backed client for the backend REST API
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Create a client from the resolved configuration
    pub fn from_config() -> anyhow::Result<Self> {
        let settings = crate::config::backend_settings()?;
        Ok(Self::new(
            settings.url.clone(),
            Duration::from_secs(settings.timeout_seconds),
        )?)
    }

    /// Build an API URL
    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }
}

#[async_trait]
impl ContentApi for BackendClient {
    async fn list_content(&self) -> Result<Vec<ContentRecord>, BackendError> {
        let response = self.client.get(self.api_url("content")).send().await?;

        if !response.status().is_success() {
            return Err(BackendError::Status {
                operation: "list",
                status: response.status().as_u16(),
            });
        }

        let body: ListResponse = response.json().await.map_err(BackendError::Parse)?;
        Ok(body.data)
    }

    async fn delete_content(&self, id: &str) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.api_url(&format!("content/{}", id)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::Status {
                operation: "delete",
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        let response = self.client.get(self.api_url("health")).send().await?;

        if !response.status().is_success() {
            return Err(BackendError::Status {
                operation: "health",
                status: response.status().as_u16(),
            });
        }

        response.json().await.map_err(BackendError::Parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let client = BackendClient::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.api_url("content"),
            "http://localhost:8080/api/content"
        );
        assert_eq!(
            client.api_url("content/abc"),
            "http://localhost:8080/api/content/abc"
        );
    }

    #[test]
    fn test_list_envelope_parsing() {
        let body = r#"{"data":[{"id":"a","nft_minted":false},{"content_hash":"beef"}]}"#;
        let parsed: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 2);
        assert_eq!(parsed.data[0].id.as_deref(), Some("a"));
        assert_eq!(parsed.data[1].content_hash.as_deref(), Some("beef"));
    }

    #[test]
    fn test_empty_envelope_defaults() {
        let parsed: ListResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.data.is_empty());
    }
}
