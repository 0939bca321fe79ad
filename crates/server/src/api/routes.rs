use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::{handlers, magnet, middleware::metrics_middleware, notifications, sessions, sync};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config().frontend.static_dir.clone();

    // API routes
    let api_routes = Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        // Search sessions
        .route("/sessions/{mode}", get(sessions::get_session))
        .route("/sessions/{mode}/query", put(sessions::set_query))
        .route("/sessions/{mode}/search", post(sessions::start_search))
        // Database sync
        .route("/sync", get(sync::get_status).post(sync::trigger_sync))
        // Notifications
        .route("/notifications", get(notifications::list_notifications))
        // Magnet links
        .route("/magnet/launch", post(magnet::launch))
        .with_state(state);

    // Serve the presentation bundle with SPA fallback
    let index_path = static_dir.join("index.html");
    let serve_dir = ServeDir::new(&static_dir).fallback(ServeFile::new(index_path));

    Router::new()
        .nest("/api/v1", api_routes)
        .fallback_service(serve_dir)
        // Outside the nest so the middleware sees full paths
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
