//! Database sync orchestration.
//!
//! A sync asks the backend to refresh its database. When it succeeds and the
//! index session already has a search on screen, that search is re-run on a
//! detached task so the results reflect the fresh data. The orchestrator does
//! not wait for that search or look at how it ends.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::GameApi;
use crate::metrics::SYNCS_TOTAL;
use crate::notify::NotificationCenter;
use crate::session::SearchSession;

const DEFAULT_SUCCESS: &str = "Database synced successfully";
const DEFAULT_FAILURE: &str = "Failed to sync database";
const CONNECTIVITY_FAILURE: &str = "Failed to connect to server";

/// How a sync ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Backend synced; `refreshed` tells whether the index search was re-run.
    Synced { message: String, refreshed: bool },
    Rejected { message: String },
    Unreachable { message: String },
}

impl SyncOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncOutcome::Synced { .. } => "synced",
            SyncOutcome::Rejected { .. } => "rejected",
            SyncOutcome::Unreachable { .. } => "unreachable",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SyncOutcome::Synced { message, .. }
            | SyncOutcome::Rejected { message }
            | SyncOutcome::Unreachable { message } => message,
        }
    }
}

pub struct SyncOrchestrator {
    api: Arc<dyn GameApi>,
    index_session: Arc<SearchSession>,
    notifications: Arc<NotificationCenter>,
    syncing: AtomicBool,
}

/// Clears the syncing flag when dropped, on every exit path.
struct SyncingGuard<'a>(&'a AtomicBool);

impl<'a> SyncingGuard<'a> {
    fn set(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for SyncingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SyncOrchestrator {
    pub fn new(
        api: Arc<dyn GameApi>,
        index_session: Arc<SearchSession>,
        notifications: Arc<NotificationCenter>,
    ) -> Self {
        Self {
            api,
            index_session,
            notifications,
            syncing: AtomicBool::new(false),
        }
    }

    /// Whether a sync is in flight. Only the trigger control consults this;
    /// [`sync`](Self::sync) itself never refuses to run.
    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::SeqCst)
    }

    pub async fn sync(&self) -> SyncOutcome {
        let _guard = SyncingGuard::set(&self.syncing);
        debug!("Database sync started");

        let outcome = match self.api.sync_database().await {
            Ok(envelope) if envelope.success => {
                let message = envelope.message().unwrap_or(DEFAULT_SUCCESS).to_string();
                info!("Database sync succeeded: {}", message);
                self.notifications.success(message.clone());

                let refreshed = self.refresh_index_search();
                SyncOutcome::Synced { message, refreshed }
            }
            Ok(envelope) => {
                let message = envelope.message().unwrap_or(DEFAULT_FAILURE).to_string();
                warn!("Database sync rejected: {}", message);
                self.notifications.error(message.clone());
                SyncOutcome::Rejected { message }
            }
            Err(e) => {
                warn!("Database sync failed: {}", e);
                self.notifications.error(CONNECTIVITY_FAILURE);
                SyncOutcome::Unreachable {
                    message: CONNECTIVITY_FAILURE.to_string(),
                }
            }
        };

        SYNCS_TOTAL.with_label_values(&[outcome.as_str()]).inc();
        outcome
    }

    /// Re-run the index search on a detached task if one is on screen.
    fn refresh_index_search(&self) -> bool {
        if !self.index_session.has_active_query() {
            return false;
        }

        // Detached on purpose: the handle is dropped without a join.
        let spawned = self.index_session.spawn_search().is_some();
        if spawned {
            debug!("Re-running index search after sync");
        }
        spawned
    }
}
