use crate::constants::prediction::UNKNOWN_WEATHER_CONDITION;
use crate::database::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fully resolved inputs for one prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionParams {
    /// Hour of day, 0-23
    pub hour: u32,
    pub water_temp: Option<f64>,
    pub air_temp: Option<f64>,
    /// WMO weather code, -1 when unknown
    pub weather_condition: i32,
    pub water_level: f64,
    pub water_flow: f64,
}

impl PredictionParams {
    /// Params for an hour with every other input unknown
    pub fn for_hour(hour: u32) -> Self {
        Self {
            hour,
            water_temp: None,
            air_temp: None,
            weather_condition: UNKNOWN_WEATHER_CONDITION,
            water_level: 0.0,
            water_flow: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), PredictionError> {
        if self.hour > 23 {
            return Err(PredictionError::InvalidHour(self.hour));
        }
        Ok(())
    }

    /// Feature vector sent to the delegated predictor
    pub fn features(&self) -> PredictionFeatures {
        PredictionFeatures {
            hour: self.hour,
            water_temp: self.water_temp.unwrap_or(0.0),
            air_temp: self.air_temp.unwrap_or(0.0),
            water_level: self.water_level,
            weather_condition: self.weather_condition,
        }
    }
}

/// Caller-supplied overrides; anything left `None` is looked up
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionQuery {
    pub hour: Option<u32>,
    pub water_temp: Option<f64>,
    pub air_temp: Option<f64>,
    pub weather_condition: Option<i32>,
}

/// Request body of the delegated predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionFeatures {
    pub hour: u32,
    pub water_temp: f64,
    pub air_temp: f64,
    pub water_level: f64,
    pub weather_condition: i32,
}

/// Response body of the delegated predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegatedPrediction {
    pub surfer_count: i64,
    /// Per-feature contribution to the count
    #[serde(default)]
    pub explanation: Option<BTreeMap<String, f64>>,
}

/// Which stage produced the returned count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    Delegated,
    Heuristic,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delegated => "delegated",
            Self::Heuristic => "heuristic",
        }
    }
}

/// Base rate times heuristic factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeuristicPrediction {
    pub base_rate: f64,
    pub factor: f64,
    pub count: u32,
}

/// Prediction with its inputs echoed back
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub hour: u32,
    pub water_temperature: Option<f64>,
    pub air_temperature: Option<f64>,
    pub weather_condition: i32,
    pub water_level: f64,
    pub water_flow: f64,
    pub prediction: u32,
    pub source: PredictionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<BTreeMap<String, f64>>,
    pub heuristic: HeuristicPrediction,
}

/// Errors from the delegated predictor; always recovered by the heuristic
#[derive(Debug, Clone, thiserror::Error)]
pub enum DelegationError {
    #[error("Predictor request failed: {0}")]
    Http(String),
    #[error("Predictor returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to decode predictor response: {0}")]
    Parse(String),
    #[error("Predictor timed out after {0}s")]
    Timeout(u64),
}

impl DelegationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Status { .. } => "status",
            Self::Parse(_) => "parse",
            Self::Timeout(_) => "timeout",
        }
    }
}

/// Errors that fail a prediction request
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("Invalid hour {0}, expected 0-23")]
    InvalidHour(u32),
    #[error("Failed to query base rate: {0}")]
    Store(#[from] StoreError),
}

/// External model computing a count from the same features
#[async_trait::async_trait]
pub trait DelegatedPredictor: Send + Sync {
    async fn predict(
        &self,
        features: &PredictionFeatures,
    ) -> Result<DelegatedPrediction, DelegationError>;

    fn name(&self) -> &str;
}
