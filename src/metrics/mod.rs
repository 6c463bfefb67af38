pub mod conditions_metrics;
pub mod prediction_metrics;
pub mod server;

pub use conditions_metrics::ConditionsMetrics;
pub use prediction_metrics::PredictionMetrics;
pub use server::start_metrics_server;
