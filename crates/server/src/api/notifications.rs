use axum::{extract::State, Json};
use std::sync::Arc;

use gamesearch_core::Notification;

use crate::state::AppState;

/// GET /api/v1/notifications
pub async fn list_notifications(State(state): State<Arc<AppState>>) -> Json<Vec<Notification>> {
    Json(state.notifications().recent())
}
