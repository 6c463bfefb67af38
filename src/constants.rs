//! Application-wide constants
//!
//! This module contains the magic numbers and default values used throughout
//! the application, making them easy to find and modify.

/// Cache-related constants
pub mod cache {
    /// Default TTL for the water temperature cache (in seconds)
    pub const DEFAULT_WATER_TEMPERATURE_TTL_SECS: u64 = 600;

    /// Default TTL for the water level/flow cache (in seconds)
    pub const DEFAULT_WATER_LEVEL_TTL_SECS: u64 = 60;
}

/// Network-related constants
pub mod network {
    /// Default timeout for upstream data source requests (in seconds)
    pub const UPSTREAM_REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Default timeout for the delegated predictor (in seconds)
    pub const PREDICTOR_TIMEOUT_SECS: u64 = 5;

    /// User agent sent to upstream services
    pub const USER_AGENT: &str = concat!("eisbach/", env!("CARGO_PKG_VERSION"));
}

/// Upstream endpoint defaults
pub mod sources {
    /// Open-Meteo forecast endpoint
    pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

    /// Munich city centre
    pub const DEFAULT_LATITUDE: f64 = 48.137154;
    pub const DEFAULT_LONGITUDE: f64 = 11.576124;

    /// Companion service that extracts the latest river temperature
    pub const DEFAULT_WATER_TEMPERATURE_URL: &str = "http://localhost:8080/api/temperature";

    /// PegelAlarm station list for gauge 16515005 (Munich / Isar)
    pub const DEFAULT_WATER_LEVEL_URL: &str =
        "https://api.pegelalarm.at/api/station/1.0/list?commonid=16515005-de&responseDetailLevel=high";

    /// HND Bayern level table for Munich / Himmelreichbrücke, last 365 days
    pub const DEFAULT_WATER_LEVEL_HISTORY_URL: &str =
        "https://www.hnd.bayern.de/pegel/isar/muenchen-himmelreichbruecke-16515005/tabelle?methode=wasserstand&days=365";

    /// Delegated predictor endpoint
    pub const DEFAULT_PREDICTOR_URL: &str = "http://localhost:5001/predict";
}

/// Prediction-related constants
pub mod prediction {
    /// Weather condition value meaning "unknown / not supplied"
    pub const UNKNOWN_WEATHER_CONDITION: i32 = -1;

    /// Lower bound of the heuristic multiplier
    pub const MIN_FACTOR: f64 = 0.5;

    /// Base rate floor for night hours without usable history
    pub const NIGHT_BASE_RATE: f64 = 0.0;

    /// Base rate floor for daytime hours without usable history
    pub const DAY_BASE_RATE: f64 = 1.0;
}

/// Monitor-related constants
pub mod monitor {
    /// Default interval between monitor predictions (in seconds)
    pub const DEFAULT_INTERVAL_SECS: u64 = 300;

    /// Default Prometheus port
    pub const DEFAULT_METRICS_PORT: u16 = 9090;
}

/// Postgres pool defaults
pub mod database {
    /// Observation traffic is light; a handful of connections is plenty
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;

    /// Seconds a query waits for a pooled connection
    pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
}
