use crate::prediction::PredictionSource;
use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_gauge, CounterVec, Gauge};

lazy_static! {
    /// Predictions served, by the stage that produced them
    static ref PREDICTIONS: CounterVec = register_counter_vec!(
        "eisbach_predictions_total",
        "Predictions served by source",
        &["source"]
    ).expect("Failed to create predictions metric");

    /// Delegated predictor failures by reason
    static ref DELEGATION_FAILURES: CounterVec = register_counter_vec!(
        "eisbach_delegation_failures_total",
        "Delegated predictor failures absorbed by the heuristic fallback",
        &["reason"]
    ).expect("Failed to create delegation_failures metric");

    /// Most recently predicted surfer count
    static ref LAST_PREDICTED_COUNT: Gauge = register_gauge!(
        "eisbach_last_predicted_surfer_count",
        "Most recently predicted surfer count"
    ).expect("Failed to create last_predicted_count metric");
}

/// Metrics for the prediction pipeline
pub struct PredictionMetrics;

impl PredictionMetrics {
    pub fn record_prediction(source: PredictionSource, count: u32) {
        PREDICTIONS.with_label_values(&[source.as_str()]).inc();
        LAST_PREDICTED_COUNT.set(count as f64);
    }

    pub fn record_delegation_failure(reason: &str) {
        DELEGATION_FAILURES.with_label_values(&[reason]).inc();
    }
}
