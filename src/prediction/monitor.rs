use super::models::{PredictionError, PredictionQuery, PredictionResult};
use super::service::PredictionService;
use crate::conditions::ConditionsService;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, error, info};

/// Periodically predicts the current hour, keeping caches and metrics warm
pub struct PredictionMonitor {
    predictions: Arc<PredictionService>,
    conditions: Arc<ConditionsService>,
    interval: Duration,
}

impl PredictionMonitor {
    pub fn new(
        predictions: Arc<PredictionService>,
        conditions: Arc<ConditionsService>,
        interval: Duration,
    ) -> Self {
        Self {
            predictions,
            conditions,
            interval,
        }
    }

    /// Runs indefinitely, predicting once per interval
    pub async fn start(self) {
        let mut interval = interval(self.interval);

        info!(
            "Starting prediction monitor with {}s interval",
            self.interval.as_secs()
        );

        loop {
            interval.tick().await;

            match self.poll_once().await {
                Ok(result) => info!(
                    "Hour {}: {} surfer(s) expected ({}), water level {:.1} cm",
                    result.hour,
                    result.prediction,
                    result.source.as_str(),
                    result.water_level
                ),
                Err(e) => error!("Prediction failed: {}", e),
            }
        }
    }

    /// One prediction for the current hour with every input looked up
    pub async fn poll_once(&self) -> Result<PredictionResult, PredictionError> {
        let result = self
            .predictions
            .predict_current(PredictionQuery::default())
            .await?;

        for (name, ttl, age) in self.conditions.cache_stats().await {
            match age {
                Some(age) => debug!(
                    "Cache {}: value age {}s of {}s TTL",
                    name,
                    age.as_secs(),
                    ttl.as_secs()
                ),
                None => debug!("Cache {}: empty", name),
            }
        }

        Ok(result)
    }
}
