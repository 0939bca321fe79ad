//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Search sessions (attempts by outcome, backend latency)
//! - Database sync
//! - Magnet launch probes

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Search Metrics
// =============================================================================

/// Search attempts total by mode and outcome.
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gamesearch_searches_total", "Total search attempts"),
        &["mode", "outcome"], // "index"/"web"; "succeeded", "rejected", "unreachable"
    )
    .unwrap()
});

/// Backend search latency in seconds.
pub static SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "gamesearch_search_duration_seconds",
            "Duration of backend search requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["mode"],
    )
    .unwrap()
});

/// Results returned per successful search.
pub static SEARCH_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "gamesearch_search_results",
            "Number of results per successful search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
        &["mode"],
    )
    .unwrap()
});

// =============================================================================
// Sync Metrics
// =============================================================================

/// Database sync attempts by outcome.
pub static SYNCS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gamesearch_syncs_total", "Total database sync attempts"),
        &["outcome"], // "synced", "rejected", "unreachable"
    )
    .unwrap()
});

// =============================================================================
// Magnet Metrics
// =============================================================================

/// Magnet launch probes by outcome.
pub static MAGNET_PROBES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gamesearch_magnet_probes_total", "Total magnet launch probes"),
        &["outcome"], // "handed_off", "no_client"
    )
    .unwrap()
});

/// All core metrics, for registration by the binary.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        Box::new(SYNCS_TOTAL.clone()),
        Box::new(MAGNET_PROBES.clone()),
    ]
}
