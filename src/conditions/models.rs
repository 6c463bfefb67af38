use crate::constants::prediction::UNKNOWN_WEATHER_CONDITION;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current air weather at the wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Air temperature in °C
    pub temperature: f64,
    /// Numeric WMO weather code, or -1 when unknown
    pub condition_code: i32,
}

impl WeatherReading {
    pub fn new(temperature: f64, condition_code: i32) -> Self {
        Self {
            temperature,
            condition_code,
        }
    }

    /// Reading used when the weather source cannot be reached
    pub fn unknown() -> Self {
        Self::new(0.0, UNKNOWN_WEATHER_CONDITION)
    }

    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_code(self.condition_code)
    }
}

/// Coarse weather classes derived from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    FogDrizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::Cloudy,
            45..=59 => Self::FogDrizzle,
            61..=69 => Self::Rain,
            71..=79 => Self::Snow,
            c if c >= 95 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Precipitation that keeps people off the wave
    pub fn is_precipitation(&self) -> bool {
        matches!(self, Self::Rain | Self::Snow)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Cloudy => "Cloudy",
            Self::FogDrizzle => "Fog/Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// River temperature reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterReading {
    /// Water temperature in °C
    pub temperature: f64,
}

/// Gauge reading for the river
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterLevelFlow {
    /// Water level in cm
    pub level: f64,
    /// Discharge in m³/s
    pub flow: f64,
    /// When the gauge reported the values
    pub observed_at: DateTime<FixedOffset>,
}

/// One row of the gauge's published level table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalWaterLevel {
    /// Measurement time as printed by the gauge operator, e.g. `14.06.2025 14:15`
    pub date_time: String,
    /// Water level in cm
    pub value: f64,
}

/// All current readings at once, each independently fallible
#[derive(Debug, Clone, Serialize)]
pub struct ConditionsSnapshot {
    pub weather: WeatherReading,
    pub weather_condition: WeatherCondition,
    pub water_temperature: Option<f64>,
    pub water_level: Option<WaterLevelFlow>,
}

/// Errors that can occur while fetching from an upstream data source
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("No {0} source configured")]
    NotConfigured(&'static str),
}

impl FetchError {
    /// Short label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Status { .. } => "status",
            Self::Parse(_) => "parse",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Timeout(_) => "timeout",
            Self::NotConfigured(_) => "not_configured",
        }
    }
}

/// Source of current air weather
#[async_trait::async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_current_weather(&self) -> Result<WeatherReading, FetchError>;

    /// Name used in logs and metrics
    fn name(&self) -> &str;
}

/// Source of the current river temperature
#[async_trait::async_trait]
pub trait WaterTemperatureSource: Send + Sync {
    async fn fetch_water_temperature(&self) -> Result<f64, FetchError>;

    fn name(&self) -> &str;
}

/// Source of the current river level and flow
#[async_trait::async_trait]
pub trait WaterLevelSource: Send + Sync {
    async fn fetch_water_level_and_flow(&self) -> Result<WaterLevelFlow, FetchError>;

    fn name(&self) -> &str;
}

/// Source of recent river level history, newest rows first as published
#[async_trait::async_trait]
pub trait WaterLevelHistorySource: Send + Sync {
    async fn fetch_water_level_history(&self) -> Result<Vec<HistoricalWaterLevel>, FetchError>;

    fn name(&self) -> &str;
}
