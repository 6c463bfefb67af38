use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, HistogramVec};
use std::time::Duration;
use tracing::debug;

lazy_static! {
    /// Cache lookups by cache name and outcome (hit, miss, stale_fallback, error)
    static ref CACHE_REQUESTS: CounterVec = register_counter_vec!(
        "eisbach_cache_requests_total",
        "Cache lookups by outcome",
        &["cache", "outcome"]
    ).expect("Failed to create cache_requests metric");

    /// Upstream fetches by source and status
    static ref UPSTREAM_FETCHES: CounterVec = register_counter_vec!(
        "eisbach_upstream_fetches_total",
        "Fetches from upstream data sources",
        &["source", "status"]
    ).expect("Failed to create upstream_fetches metric");

    /// Upstream fetch duration
    static ref UPSTREAM_FETCH_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "eisbach_upstream_fetch_duration_seconds",
        "Upstream fetch duration in seconds",
        &["source"],
        // Buckets: 10ms to 30s
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    ).expect("Failed to create upstream_fetch_duration metric");
}

/// Metrics for environmental data fetching and caching
pub struct ConditionsMetrics;

impl ConditionsMetrics {
    pub fn record_cache_outcome(cache: &str, outcome: &str) {
        CACHE_REQUESTS.with_label_values(&[cache, outcome]).inc();
    }

    pub fn record_upstream_fetch(source: &str, status: &str, duration: Duration) {
        UPSTREAM_FETCHES.with_label_values(&[source, status]).inc();
        UPSTREAM_FETCH_DURATION_SECONDS
            .with_label_values(&[source])
            .observe(duration.as_secs_f64());

        debug!(
            "Upstream fetch from {}: {} in {:.3}s",
            source,
            status,
            duration.as_secs_f64()
        );
    }
}
