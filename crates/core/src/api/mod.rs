//! Client for the game indexing backend.
//!
//! The backend wraps every payload in a [`ServiceResponse`] envelope. This
//! module only moves envelopes across the network boundary; deciding what a
//! falsy `success` means is left to the caller.

mod http;

pub use http::HttpGameApi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::games::{IndexedGame, WebGame};

/// Errors that prevent an envelope from being obtained at all.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (unreachable, timeout, connection reset).
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The body was not a service response envelope.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Response envelope shared by every backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub response_object: Option<T>,
    #[serde(default)]
    pub status_code: u16,
}

impl<T> ServiceResponse<T> {
    /// The backend message, if it sent a non-empty one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

/// Envelope returned by the sync endpoint (payload is always null).
pub type SyncResponse = ServiceResponse<Value>;

/// Backend operations used by the search sessions and the sync orchestrator.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Search the backend's own index.
    async fn search_index(
        &self,
        query: &str,
    ) -> Result<ServiceResponse<Vec<IndexedGame>>, ApiError>;

    /// Search the web through the backend.
    async fn search_web(&self, query: &str) -> Result<ServiceResponse<Vec<WebGame>>, ApiError>;

    /// Ask the backend to resync its database.
    async fn sync_database(&self) -> Result<SyncResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_with_null_payload() {
        let envelope: ServiceResponse<Vec<WebGame>> = serde_json::from_value(json!({
            "success": true,
            "message": "ok",
            "responseObject": null,
            "statusCode": 200
        }))
        .unwrap();
        assert!(envelope.success);
        assert!(envelope.response_object.is_none());
        assert_eq!(envelope.status_code, 200);
    }

    #[test]
    fn test_envelope_missing_optional_fields() {
        let envelope: ServiceResponse<Vec<WebGame>> =
            serde_json::from_value(json!({ "success": false })).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message(), None);
        assert_eq!(envelope.status_code, 0);
    }

    #[test]
    fn test_envelope_without_success_is_rejected() {
        let result: Result<SyncResponse, _> =
            serde_json::from_value(json!({ "message": "hello" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_message_ignores_empty() {
        let envelope = SyncResponse {
            success: false,
            message: Some(String::new()),
            response_object: None,
            status_code: 500,
        };
        assert_eq!(envelope.message(), None);
    }
}
