//! Test data factories for creating common test objects

use super::mocks::{
    MockWaterLevelHistorySource, MockWaterLevelSource, MockWaterTemperatureSource,
    MockWeatherSource,
};
use crate::conditions::{
    ConditionsService, ConditionsSettings, FetchError, HistoricalWaterLevel, WaterLevelFlow,
    WeatherReading,
};
use crate::database::SurferObservation;
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Gauge reading with a fixed observation time
pub fn level_flow(level: f64, flow: f64) -> WaterLevelFlow {
    WaterLevelFlow {
        level,
        flow,
        observed_at: DateTime::<FixedOffset>::parse_from_rfc3339("2025-06-14T14:00:00+02:00")
            .expect("valid timestamp"),
    }
}

pub fn historical_level(date_time: &str, value: f64) -> HistoricalWaterLevel {
    HistoricalWaterLevel {
        date_time: date_time.to_string(),
        value,
    }
}

/// Local time on 2025-06-14, as stored (UTC)
pub fn local_time(hour: u32, minute: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(2025, 6, 14, hour, minute, 0)
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

/// Observation on 2025-06-14 at the given local hour
pub fn observation_at(hour: u32, count: i32) -> SurferObservation {
    SurferObservation {
        timestamp: local_time(hour, 30),
        count,
        water_temperature: Some(16.0),
        air_temperature: Some(22.0),
        weather_condition: Some(0),
        water_level: Some(143.0),
        water_flow: Some(20.0),
    }
}

/// Settings with a generous TTL and a short timeout
pub fn test_settings() -> ConditionsSettings {
    ConditionsSettings {
        water_temperature_ttl: Duration::from_secs(600),
        water_level_ttl: Duration::from_secs(60),
        fetch_timeout: Duration::from_secs(1),
    }
}

pub fn upstream_down() -> FetchError {
    FetchError::Http("connection refused".to_string())
}

/// The mock sources behind one [`ConditionsService`]
pub struct MockConditions {
    pub weather: Arc<MockWeatherSource>,
    pub water_temperature: Arc<MockWaterTemperatureSource>,
    pub water_level: Arc<MockWaterLevelSource>,
    pub water_level_history: Arc<MockWaterLevelHistorySource>,
}

impl MockConditions {
    /// Clear 22°C, 16.5°C water, 143 cm at 9.5 m³/s
    pub fn healthy() -> Self {
        Self {
            weather: Arc::new(MockWeatherSource::succeeding(WeatherReading::new(22.0, 0))),
            water_temperature: Arc::new(MockWaterTemperatureSource::succeeding(16.5)),
            water_level: Arc::new(MockWaterLevelSource::succeeding(level_flow(143.0, 9.5))),
            water_level_history: Arc::new(MockWaterLevelHistorySource::succeeding(vec![
                historical_level("14.06.2025 14:15", 143.0),
                historical_level("14.06.2025 14:00", 142.5),
            ])),
        }
    }

    /// Every upstream unreachable
    pub fn all_failing() -> Self {
        Self {
            weather: Arc::new(MockWeatherSource::failing(upstream_down())),
            water_temperature: Arc::new(MockWaterTemperatureSource::failing(upstream_down())),
            water_level: Arc::new(MockWaterLevelSource::failing(upstream_down())),
            water_level_history: Arc::new(MockWaterLevelHistorySource::failing(upstream_down())),
        }
    }

    pub fn service(&self) -> ConditionsService {
        self.service_with(test_settings())
    }

    pub fn service_with(&self, settings: ConditionsSettings) -> ConditionsService {
        ConditionsService::new(
            self.weather.clone(),
            self.water_temperature.clone(),
            self.water_level.clone(),
            settings,
        )
        .with_water_level_history(self.water_level_history.clone())
    }
}
