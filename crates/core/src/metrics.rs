//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Torznab requests by classification
//! - Feed sizes
//! - Upstream services (OMDb, stream index)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Torznab Metrics
// =============================================================================

/// Torznab requests total by kind.
pub static TORZNAB_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("brazuca_torznab_requests_total", "Total Torznab requests"),
        &["kind"], // "caps", "search", "unsupported"
    )
    .unwrap()
});

/// Items per emitted feed.
pub static FEED_ITEMS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("brazuca_feed_items", "Number of items per emitted feed")
            .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
    )
    .unwrap()
});

// =============================================================================
// Upstream Service Metrics
// =============================================================================

/// Upstream request duration.
pub static UPSTREAM_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "brazuca_upstream_duration_seconds",
            "Duration of upstream service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["service"],
    )
    .unwrap()
});

/// Upstream requests total.
pub static UPSTREAM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "brazuca_upstream_requests_total",
            "Total upstream service requests",
        ),
        &["service", "outcome"], // outcome: "found", "not_found", "transport_error"
    )
    .unwrap()
});

/// All core metrics, for registration in the server registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(TORZNAB_REQUESTS.clone()),
        Box::new(FEED_ITEMS.clone()),
        Box::new(UPSTREAM_DURATION.clone()),
        Box::new(UPSTREAM_REQUESTS.clone()),
    ]
}
