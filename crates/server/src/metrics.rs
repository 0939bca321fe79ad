//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the front-end service:
//! - HTTP request metrics (latency, counts)
//! - Session and sync status (collected dynamically)
//! - Core metrics (searches, syncs, magnet probes)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};

use gamesearch_core::SearchMode;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "gamesearch_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gamesearch_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "gamesearch_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Session Metrics (collected dynamically)
// =============================================================================

/// Results currently shown per session.
pub static SESSION_RESULTS: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new(
            "gamesearch_session_results",
            "Number of results currently held by a session",
        ),
        &["mode"],
    )
    .unwrap()
});

/// Sessions with a search in flight (1 = loading).
pub static SESSION_LOADING: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("gamesearch_session_loading", "Whether a session is loading"),
        &["mode"],
    )
    .unwrap()
});

/// Sync in flight (1 = syncing).
pub static SYNC_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("gamesearch_sync_in_flight", "Whether a database sync is running").unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Sessions
    registry
        .register(Box::new(SESSION_RESULTS.clone()))
        .unwrap();
    registry
        .register(Box::new(SESSION_LOADING.clone()))
        .unwrap();
    registry.register(Box::new(SYNC_IN_FLIGHT.clone())).unwrap();

    // Core metrics (searches, syncs, magnet probes)
    for metric in gamesearch_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so the gauges reflect the sessions right now.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    for mode in [SearchMode::Index, SearchMode::Web] {
        let snapshot = state.session(mode).snapshot();
        SESSION_RESULTS
            .with_label_values(&[mode.as_str()])
            .set(snapshot.results.len() as i64);
        SESSION_LOADING
            .with_label_values(&[mode.as_str()])
            .set(i64::from(snapshot.is_loading));
    }

    SYNC_IN_FLIGHT.set(i64::from(state.sync().is_syncing()));
}

/// Label for requests no route matched (static files, unknown paths).
pub const UNMATCHED_PATH: &str = "/unmatched";
