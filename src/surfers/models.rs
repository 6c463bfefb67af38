use crate::database::StoreError;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A surfer count as submitted by a user
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewObservation {
    pub count: i32,
    /// Kept as given; stamped with the current time when absent
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub water_temperature: Option<f64>,
    #[serde(default)]
    pub water_level: Option<f64>,
    #[serde(default)]
    pub water_flow: Option<f64>,
}

impl NewObservation {
    pub fn new(count: i32) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ObservationError {
    #[error("Surfer count must not be negative, got {0}")]
    NegativeCount(i32),

    #[error("Failed to store observation: {0}")]
    Store(#[from] StoreError),
}
