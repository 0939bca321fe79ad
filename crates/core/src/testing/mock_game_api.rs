//! Mock game backend for testing.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex, Notify};

use crate::api::{ApiError, GameApi, ServiceResponse, SyncResponse};
use crate::games::{IndexedGame, WebGame};

/// Which backend endpoint a call went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    SearchIndex,
    SearchWeb,
    Sync,
}

/// A recorded backend call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    /// Query string, for search calls.
    pub query: Option<String>,
    /// When the call was made.
    pub timestamp: chrono::DateTime<Utc>,
}

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply<T> {
    /// An envelope, successful or not.
    Respond(ServiceResponse<T>),
    /// The backend could not be reached.
    TransportFailure,
}

impl<T> MockReply<T> {
    /// `success: true` with the given payload.
    pub fn ok(payload: T) -> Self {
        MockReply::Respond(ServiceResponse {
            success: true,
            message: Some("OK".to_string()),
            response_object: Some(payload),
            status_code: 200,
        })
    }

    /// `success: true` with a null payload.
    pub fn ok_null() -> Self {
        MockReply::Respond(ServiceResponse {
            success: true,
            message: Some("OK".to_string()),
            response_object: None,
            status_code: 200,
        })
    }

    /// `success: false` with the given message (empty for none).
    pub fn rejected(message: &str) -> Self {
        MockReply::Respond(ServiceResponse {
            success: false,
            message: Some(message.to_string()),
            response_object: None,
            status_code: 400,
        })
    }

    pub fn transport_failure() -> Self {
        MockReply::TransportFailure
    }
}

struct QueuedReply<T> {
    reply: MockReply<T>,
    /// When set, the call waits for this before answering.
    gate: Option<oneshot::Receiver<()>>,
}

type Queue<T> = Arc<Mutex<VecDeque<QueuedReply<T>>>>;

/// Mock implementation of the GameApi trait.
///
/// Provides controllable behavior for testing:
/// - Queue replies per endpoint (successful, rejected, unreachable)
/// - Hold a call open until the test releases it
/// - Track calls for assertions
///
/// An endpoint with an empty queue answers `success: true` with an empty list.
///
/// # Example
///
/// ```rust,ignore
/// use gamesearch_core::testing::{fixtures, MockGameApi, MockReply};
///
/// let api = MockGameApi::new();
/// api.push_index(MockReply::ok(vec![fixtures::indexed_game("1", "Celeste")])).await;
///
/// // Hold the next web search until `release` fires
/// let release = api.push_web_gated(MockReply::rejected("quota")).await;
/// release.send(()).unwrap();
/// ```
#[derive(Default)]
pub struct MockGameApi {
    index: Queue<Vec<IndexedGame>>,
    web: Queue<Vec<WebGame>>,
    sync: Queue<Value>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    call_made: Arc<Notify>,
}

impl std::fmt::Debug for MockGameApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockGameApi")
            .field("index", &"<queue>")
            .field("web", &"<queue>")
            .field("sync", &"<queue>")
            .field("calls", &"<calls>")
            .finish()
    }
}

impl MockGameApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_index(&self, reply: MockReply<Vec<IndexedGame>>) {
        push(&self.index, reply, None).await;
    }

    pub async fn push_index_gated(
        &self,
        reply: MockReply<Vec<IndexedGame>>,
    ) -> oneshot::Sender<()> {
        push_gated(&self.index, reply).await
    }

    pub async fn push_web(&self, reply: MockReply<Vec<WebGame>>) {
        push(&self.web, reply, None).await;
    }

    pub async fn push_web_gated(&self, reply: MockReply<Vec<WebGame>>) -> oneshot::Sender<()> {
        push_gated(&self.web, reply).await
    }

    pub async fn push_sync(&self, reply: MockReply<Value>) {
        push(&self.sync, reply, None).await;
    }

    pub async fn push_sync_gated(&self, reply: MockReply<Value>) -> oneshot::Sender<()> {
        push_gated(&self.sync, reply).await
    }

    /// Get recorded calls, in the order they were made.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// Recorded calls to one endpoint.
    pub async fn calls_to(&self, endpoint: Endpoint) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .cloned()
            .collect()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Wait until at least `n` calls have been made.
    pub async fn wait_for_calls(&self, n: usize) {
        loop {
            let notified = self.call_made.notified();
            if self.call_count().await >= n {
                return;
            }
            notified.await;
        }
    }

    async fn record(&self, endpoint: Endpoint, query: Option<&str>) {
        self.calls.lock().await.push(RecordedCall {
            endpoint,
            query: query.map(str::to_string),
            timestamp: Utc::now(),
        });
        self.call_made.notify_waiters();
    }
}

async fn push<T>(queue: &Queue<T>, reply: MockReply<T>, gate: Option<oneshot::Receiver<()>>) {
    queue.lock().await.push_back(QueuedReply { reply, gate });
}

async fn push_gated<T>(queue: &Queue<T>, reply: MockReply<T>) -> oneshot::Sender<()> {
    let (tx, rx) = oneshot::channel();
    push(queue, reply, Some(rx)).await;
    tx
}

/// Take the next queued reply; taken before the call is recorded so that a
/// test waiting on the call count sees the queue already consumed.
async fn take<T>(queue: &Queue<T>) -> Option<QueuedReply<T>> {
    queue.lock().await.pop_front()
}

/// Wait on the reply's gate and turn it into a result.
async fn resolve<T>(next: Option<QueuedReply<T>>, empty: T) -> Result<ServiceResponse<T>, ApiError> {
    let reply = match next {
        Some(QueuedReply { reply, gate }) => {
            if let Some(gate) = gate {
                // A dropped sender releases the call too
                let _ = gate.await;
            }
            reply
        }
        None => MockReply::ok(empty),
    };

    match reply {
        MockReply::Respond(envelope) => Ok(envelope),
        MockReply::TransportFailure => Err(ApiError::ParseError(
            "mock transport failure".to_string(),
        )),
    }
}

#[async_trait]
impl GameApi for MockGameApi {
    async fn search_index(
        &self,
        query: &str,
    ) -> Result<ServiceResponse<Vec<IndexedGame>>, ApiError> {
        let next = take(&self.index).await;
        self.record(Endpoint::SearchIndex, Some(query)).await;
        resolve(next, Vec::new()).await
    }

    async fn search_web(&self, query: &str) -> Result<ServiceResponse<Vec<WebGame>>, ApiError> {
        let next = take(&self.web).await;
        self.record(Endpoint::SearchWeb, Some(query)).await;
        resolve(next, Vec::new()).await
    }

    async fn sync_database(&self) -> Result<SyncResponse, ApiError> {
        let next = take(&self.sync).await;
        self.record(Endpoint::Sync, None).await;
        resolve(next, Value::Null).await
    }
}
