pub mod cache;
pub mod models;
pub mod providers;
pub mod service;


pub use cache::TtlCache;
pub use models::{
    ConditionsSnapshot, FetchError, HistoricalWaterLevel, WaterLevelFlow,
    WaterLevelHistorySource, WaterLevelSource, WaterReading, WaterTemperatureSource,
    WeatherCondition, WeatherReading, WeatherSource,
};
pub use service::{ConditionsService, ConditionsSettings};
