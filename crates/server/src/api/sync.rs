use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use gamesearch_core::SyncOutcome;

use super::handlers::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SyncStatusResponse {
    pub is_syncing: bool,
}

#[derive(Debug, Serialize)]
pub struct SyncResultResponse {
    /// "synced", "rejected" or "unreachable"
    pub outcome: &'static str,
    pub message: String,
    /// Whether the index search was re-run after the sync.
    pub refreshed: bool,
}

impl From<SyncOutcome> for SyncResultResponse {
    fn from(outcome: SyncOutcome) -> Self {
        let refreshed = matches!(outcome, SyncOutcome::Synced { refreshed: true, .. });
        Self {
            outcome: outcome.as_str(),
            message: outcome.message().to_string(),
            refreshed,
        }
    }
}

/// GET /api/v1/sync
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<SyncStatusResponse> {
    Json(SyncStatusResponse {
        is_syncing: state.sync().is_syncing(),
    })
}

/// POST /api/v1/sync
///
/// Refused while a sync is already running, the same way the sync button is
/// disabled. Backend failures still answer 200 and are reported in `outcome`.
pub async fn trigger_sync(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SyncResultResponse>, (StatusCode, Json<ErrorResponse>)> {
    if state.sync().is_syncing() {
        return Err(ErrorResponse::reply(
            StatusCode::CONFLICT,
            "A database sync is already running",
        ));
    }

    let outcome = state.sync().sync().await;
    Ok(Json(outcome.into()))
}
