//! reqwest implementation of [`GameApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::BackendConfig;
use crate::games::{IndexedGame, WebGame};

use super::{ApiError, GameApi, ServiceResponse, SyncResponse};

/// HTTP client for the game indexing backend.
pub struct HttpGameApi {
    client: Client,
    base_url: String,
}

impl HttpGameApi {
    /// Create a new client for the configured backend origin.
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
    ) -> Result<ServiceResponse<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        debug!("Backend search: url='{}', query='{}'", url, query);

        let response = self.client.get(&url).query(&[("q", query)]).send().await?;
        decode_envelope(response).await
    }
}

/// Decode the envelope whatever the HTTP status; the backend reports
/// failures in the body.
async fn decode_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<ServiceResponse<T>, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;

    serde_json::from_slice(&body).map_err(|e| {
        ApiError::ParseError(format!(
            "Failed to parse backend response (HTTP {}): {}",
            status.as_u16(),
            e
        ))
    })
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn search_index(
        &self,
        query: &str,
    ) -> Result<ServiceResponse<Vec<IndexedGame>>, ApiError> {
        self.get_envelope("/games/search", query).await
    }

    async fn search_web(&self, query: &str) -> Result<ServiceResponse<Vec<WebGame>>, ApiError> {
        self.get_envelope("/games/search/google", query).await
    }

    async fn sync_database(&self) -> Result<SyncResponse, ApiError> {
        let url = format!("{}/games/sync", self.base_url);

        debug!("Backend sync: url='{}'", url);

        let response = self.client.post(&url).send().await?;
        decode_envelope(response).await
    }
}
