use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use std::sync::Arc;

use gamesearch_core::{LaunchOutcome, MagnetError};

use super::handlers::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LaunchRequest {
    pub uri: String,
}

/// POST /api/v1/magnet/launch
///
/// Waits out the probe window before answering when no client reacts.
pub async fn launch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LaunchRequest>,
) -> Result<Json<LaunchOutcome>, (StatusCode, Json<ErrorResponse>)> {
    match state.magnet().launch(&request.uri).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e @ MagnetError::NotMagnet(_)) => {
            Err(ErrorResponse::reply(StatusCode::BAD_REQUEST, e.to_string()))
        }
    }
}
