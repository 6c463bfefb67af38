use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user-submitted surfer count, enriched with the conditions at that time
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SurferObservation {
    /// When the surfers were counted
    pub timestamp: DateTime<Utc>,

    /// Number of surfers, never negative
    pub count: i32,

    /// Water temperature in °C
    pub water_temperature: Option<f64>,

    /// Air temperature in °C
    pub air_temperature: Option<f64>,

    /// WMO weather code
    pub weather_condition: Option<i32>,

    /// Water level in cm
    pub water_level: Option<f64>,

    /// Discharge in m³/s
    pub water_flow: Option<f64>,
}

impl SurferObservation {
    /// Hour of day on the local clock; base rates are bucketed by it
    pub fn local_hour(&self) -> u32 {
        self.timestamp.with_timezone(&Local).hour()
    }
}
