//! Search session state machine.
//!
//! One [`SearchSession`] exists per search surface. A search moves the session
//! from idle to searching synchronously, then resolves to succeeded or failed
//! once the backend answers:
//!
//! ```text
//! Idle -> Searching -> Succeeded | Failed
//!            ^              |
//!            +--------------+   (a new search)
//! ```
//!
//! Overlapping searches are not de-duplicated or cancelled. Each one writes its
//! result when it resolves, so the last one to resolve wins.

mod types;

pub use types::*;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{ApiError, GameApi, ServiceResponse};
use crate::games::GameResult;
use crate::metrics::{SEARCHES_TOTAL, SEARCH_DURATION, SEARCH_RESULTS};

/// A search surface bound to one backend mode.
pub struct SearchSession {
    mode: SearchMode,
    api: Arc<dyn GameApi>,
    state: Mutex<SessionState>,
}

impl SearchSession {
    pub fn new(mode: SearchMode, api: Arc<dyn GameApi>) -> Self {
        Self {
            mode,
            api,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    /// Update the input text. Nothing else changes until a search runs.
    pub fn set_query(&self, query: impl Into<String>) {
        self.lock().query = query.into();
    }

    /// Whether a search has been attempted and the query is not blank.
    pub fn has_active_query(&self) -> bool {
        let state = self.lock();
        state.has_searched && !state.query.trim().is_empty()
    }

    /// Search with the current query and wait for the result.
    pub async fn run_search(&self) -> SearchOutcome {
        match self.begin_search() {
            Some(query) => self.finish_search(&query).await,
            None => SearchOutcome::Skipped,
        }
    }

    /// Enter the searching state now and resolve the search on a detached task.
    ///
    /// Returns `None` (and changes nothing) when the query is blank.
    pub fn spawn_search(self: &Arc<Self>) -> Option<JoinHandle<SearchOutcome>> {
        let query = self.begin_search()?;
        let session = Arc::clone(self);
        Some(tokio::spawn(async move {
            session.finish_search(&query).await
        }))
    }

    /// Synchronous half of a search: validate and mark the session as loading.
    fn begin_search(&self) -> Option<String> {
        let mut state = self.lock();
        let query = state.query.trim().to_string();
        if query.is_empty() {
            return None;
        }

        state.is_loading = true;
        state.error = None;
        state.has_searched = true;
        Some(query)
    }

    async fn finish_search(&self, query: &str) -> SearchOutcome {
        debug!("{} search started: query='{}'", self.mode, query);

        let started = Instant::now();
        let response = self.fetch(query).await;
        SEARCH_DURATION
            .with_label_values(&[self.mode.as_str()])
            .observe(started.elapsed().as_secs_f64());

        let outcome = self.apply(response);
        SEARCHES_TOTAL
            .with_label_values(&[self.mode.as_str(), outcome.as_str()])
            .inc();
        outcome
    }

    async fn fetch(&self, query: &str) -> Result<ServiceResponse<Vec<GameResult>>, ApiError> {
        match self.mode {
            SearchMode::Index => Ok(tag(self.api.search_index(query).await?)),
            SearchMode::Web => Ok(tag(self.api.search_web(query).await?)),
        }
    }

    fn apply(&self, response: Result<ServiceResponse<Vec<GameResult>>, ApiError>) -> SearchOutcome {
        let mut state = self.lock();
        state.is_loading = false;

        match response {
            Ok(envelope) if envelope.success => {
                let results = envelope.response_object.unwrap_or_default();
                let count = results.len();
                SEARCH_RESULTS
                    .with_label_values(&[self.mode.as_str()])
                    .observe(count as f64);
                info!("{} search returned {} results", self.mode, count);

                state.results = results;
                state.error = None;
                SearchOutcome::Succeeded { count }
            }
            Ok(envelope) => {
                let message = envelope
                    .message()
                    .unwrap_or(self.mode.default_error())
                    .to_string();
                warn!("{} search rejected by backend: {}", self.mode, message);

                state.results.clear();
                state.error = Some(message.clone());
                SearchOutcome::Rejected { message }
            }
            Err(e) => {
                warn!("{} search failed: {}", self.mode, e);

                let message = self.mode.connectivity_error().to_string();
                state.results.clear();
                state.error = Some(message.clone());
                SearchOutcome::Unreachable { message }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Stamp the result variant from the endpoint the payload came from.
fn tag<T: Into<GameResult>>(envelope: ServiceResponse<Vec<T>>) -> ServiceResponse<Vec<GameResult>> {
    ServiceResponse {
        success: envelope.success,
        message: envelope.message,
        response_object: envelope
            .response_object
            .map(|games| games.into_iter().map(Into::into).collect()),
        status_code: envelope.status_code,
    }
}
