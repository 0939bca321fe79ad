//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock dependencies injected, so the HTTP surface can be exercised
//! without a real game backend or desktop.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use gamesearch_core::{
    testing::{MockGameApi, MockMagnetOpener},
    Config, FrontendConfig, MagnetConfig,
};
use gamesearch_server::state::AppState;

/// Re-export fixtures for test convenience
pub use gamesearch_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new();
///     fixture.api.push_web(MockReply::ok(vec![fixtures::web_game("Celeste")])).await;
///
///     let response = fixture.post("/api/v1/sessions/web/search", json!({
///         "query": "celeste"
///     })).await;
///
///     assert_eq!(response.status, 202);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Shared state behind the router
    pub state: Arc<AppState>,
    /// Mock game backend - queue replies and inspect calls
    pub api: Arc<MockGameApi>,
    /// Mock desktop magnet handler
    pub opener: Arc<MockMagnetOpener>,
    /// Static directory served as the fallback
    pub static_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// A fixture whose desktop never reacts to magnet links.
    pub fn new() -> Self {
        Self::with_opener(MockMagnetOpener::silent())
    }

    pub fn with_opener(opener: MockMagnetOpener) -> Self {
        let static_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(
            static_dir.path().join("index.html"),
            "<!doctype html><title>Game Search</title>",
        )
        .expect("Failed to write index.html");

        let api = Arc::new(MockGameApi::new());
        let opener = Arc::new(opener);

        let config = Config {
            magnet: MagnetConfig {
                // Keep fallback tests quick
                probe_window_ms: 50,
                ..Default::default()
            },
            frontend: FrontendConfig {
                static_dir: static_dir.path().to_path_buf(),
            },
            ..Default::default()
        };

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&api) as Arc<dyn gamesearch_core::GameApi>,
            Arc::clone(&opener) as Arc<dyn gamesearch_core::MagnetOpener>,
        ));
        let router = gamesearch_server::api::create_router(Arc::clone(&state));

        Self {
            router,
            state,
            api,
            opener,
            static_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Get the raw body of a response (for non-JSON endpoints).
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    /// Poll a session until its background search has resolved.
    pub async fn wait_until_idle(&self, mode: &str) -> TestResponse {
        let path = format!("/api/v1/sessions/{}", mode);
        for _ in 0..200 {
            let response = self.get(&path).await;
            if response.body["is_loading"] == Value::Bool(false) {
                return response;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("{} session did not settle", mode);
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
