//! Search session endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use gamesearch_core::{ListStatus, SearchMode, SearchSession, SessionState};

use super::handlers::ErrorResponse;
use crate::state::AppState;

/// A session as the presentation layer sees it.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub mode: SearchMode,
    #[serde(flatten)]
    pub state: SessionState,
    pub status: ListStatus,
    /// Text for the loading indicator, present only while searching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading_text: Option<&'static str>,
}

impl SessionResponse {
    fn from_session(session: &SearchSession) -> Self {
        let state = session.snapshot();
        let status = state.list_status();
        let loading_text = state.is_loading.then(|| session.mode().loading_text());
        Self {
            mode: session.mode(),
            state,
            status,
            loading_text,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetQueryRequest {
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct StartSearchRequest {
    /// Replaces the session's query before searching when present.
    #[serde(default)]
    pub query: Option<String>,
}

fn parse_mode(mode: &str) -> Result<SearchMode, (StatusCode, Json<ErrorResponse>)> {
    mode.parse()
        .map_err(|e: String| ErrorResponse::reply(StatusCode::NOT_FOUND, e))
}

/// GET /api/v1/sessions/{mode}
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mode = parse_mode(&mode)?;
    Ok(Json(SessionResponse::from_session(state.session(mode))))
}

/// PUT /api/v1/sessions/{mode}/query
pub async fn set_query(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
    Json(request): Json<SetQueryRequest>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mode = parse_mode(&mode)?;
    let session = state.session(mode);
    session.set_query(request.query);
    Ok(Json(SessionResponse::from_session(session)))
}

/// POST /api/v1/sessions/{mode}/search
///
/// Returns as soon as the session is searching; the backend call finishes in
/// the background. A blank query leaves the session untouched.
pub async fn start_search(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
    Json(request): Json<StartSearchRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), (StatusCode, Json<ErrorResponse>)> {
    let mode = parse_mode(&mode)?;
    let session = state.session(mode);

    if let Some(query) = request.query {
        session.set_query(query);
    }

    let status = match session.spawn_search() {
        Some(_) => StatusCode::ACCEPTED,
        None => {
            debug!("{} search skipped: blank query", mode);
            StatusCode::OK
        }
    };

    Ok((status, Json(SessionResponse::from_session(session))))
}
