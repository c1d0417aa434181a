//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the cardshelf server:
//! - HTTP request metrics (latency, counts, in-flight)
//! - Catalog size and refresh outcomes
//! - Query result sizes

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};
use regex_lite::Regex;

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
            "cardshelf_http_request_duration_seconds",
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
        Opts::new("cardshelf_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "cardshelf_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Records in the loaded catalog snapshot.
pub static CATALOG_RECORDS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "cardshelf_catalog_records",
        "Number of records in the loaded catalog",
    )
    .unwrap()
});

/// Catalog refreshes by outcome.
pub static CATALOG_REFRESHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cardshelf_catalog_refreshes_total",
            "Catalog refresh attempts",
        ),
        &["result"],
    )
    .unwrap()
});

/// Records matched per product query.
pub static QUERY_MATCHES: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "cardshelf_query_matches",
            "Records matched by product queries",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0]),
    )
    .unwrap()
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

    // Catalog
    registry
        .register(Box::new(CATALOG_RECORDS.clone()))
        .unwrap();
    registry
        .register(Box::new(CATALOG_REFRESHES_TOTAL.clone()))
        .unwrap();
    registry.register(Box::new(QUERY_MATCHES.clone())).unwrap();
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

static NUMERIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\d+(/|$)").unwrap());

/// Normalize a path for metric labels.
///
/// Product ids are arbitrary strings, so everything below `/products/` is
/// collapsed to `{id}`; bare numeric segments elsewhere become `{id}` too.
pub fn normalize_path(path: &str) -> String {
    if let Some((prefix, rest)) = path.split_once("/products/") {
        if !rest.is_empty() {
            return format!("{}/products/{{id}}", prefix);
        }
    }
    NUMERIC_SEGMENT.replace_all(path, "/{id}$1").to_string()
}
