use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

use crate::conditions::ConditionsSettings;
use crate::constants::{cache, database, monitor, network, sources};

/// The main configuration structure for Eisbach
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EisbachConfig {
    /// Upstream data sources
    #[serde(default)]
    #[validate]
    pub sources: SourcesConfig,

    /// Cache TTLs
    #[serde(default)]
    #[validate]
    pub cache: CacheConfig,

    /// Delegated predictor
    #[serde(default)]
    #[validate]
    pub predictor: PredictorConfig,

    /// Metrics configuration
    #[serde(default)]
    #[validate]
    pub metrics: MetricsConfig,

    /// Monitor loop configuration
    #[serde(default)]
    #[validate]
    pub monitor: MonitorConfig,

    /// Postgres pool sizing
    #[serde(default)]
    #[validate]
    pub database: DatabaseConfig,
}

impl EisbachConfig {
    /// Settings for the conditions facade
    pub fn conditions_settings(&self) -> ConditionsSettings {
        ConditionsSettings {
            water_temperature_ttl: Duration::from_secs(self.cache.water_temperature_ttl_secs),
            water_level_ttl: Duration::from_secs(self.cache.water_level_ttl_secs),
            fetch_timeout: self.sources.request_timeout(),
        }
    }
}

/// Where current conditions come from
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SourcesConfig {
    /// Open-Meteo forecast endpoint
    #[serde(default = "default_weather_base_url")]
    #[validate(url)]
    pub weather_base_url: String,

    #[serde(default = "default_latitude")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    /// Service answering `{"temperature": ..}`
    #[serde(default = "default_water_temperature_url")]
    #[validate(url)]
    pub water_temperature_url: String,

    /// PegelAlarm station list URL
    #[serde(default = "default_water_level_url")]
    #[validate(url)]
    pub water_level_url: String,

    /// HND Bayern water level table page
    #[serde(default = "default_water_level_history_url")]
    #[validate(url)]
    pub water_level_history_url: String,

    /// Timeout for each upstream request in seconds (default: 10)
    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
}

impl SourcesConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            weather_base_url: default_weather_base_url(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            water_temperature_url: default_water_temperature_url(),
            water_level_url: default_water_level_url(),
            water_level_history_url: default_water_level_history_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Cache TTLs in seconds
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CacheConfig {
    /// Water temperature TTL (default: 600 - 10 minutes)
    #[serde(default = "default_water_temperature_ttl")]
    #[validate(range(min = 1))]
    pub water_temperature_ttl_secs: u64,

    /// Water level/flow TTL (default: 60 - 1 minute)
    #[serde(default = "default_water_level_ttl")]
    #[validate(range(min = 1))]
    pub water_level_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            water_temperature_ttl_secs: default_water_temperature_ttl(),
            water_level_ttl_secs: default_water_level_ttl(),
        }
    }
}

/// Delegated predictor configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictorConfig {
    /// Whether to ask the delegated predictor at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Only checked when the predictor is enabled
    #[serde(default = "default_predictor_url")]
    pub url: String,

    /// Timeout in seconds (default: 5)
    #[serde(default = "default_predictor_timeout")]
    #[validate(range(min = 1, max = 120))]
    pub timeout_secs: u64,
}

impl PredictorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_predictor_url(),
            timeout_secs: default_predictor_timeout(),
        }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MetricsConfig {
    /// Serve Prometheus metrics while monitoring
    #[serde(default)]
    pub enabled: bool,

    /// Metrics server port
    #[serde(default = "default_metrics_port")]
    #[validate(range(min = 1))]
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

/// Monitor loop configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MonitorConfig {
    /// Seconds between predictions (default: 300)
    #[serde(default = "default_monitor_interval")]
    #[validate(range(min = 1))]
    pub interval_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_monitor_interval(),
        }
    }
}

/// Postgres pool settings; the URL itself comes from `DATABASE_URL`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    /// Upper bound on pooled connections (default: 5)
    #[serde(default = "default_max_connections")]
    #[validate(range(min = 1, max = 100))]
    pub max_connections: u32,

    /// Connections kept open while idle (default: 1)
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// How long a request waits for a free connection (default: 5)
    #[serde(default = "default_acquire_timeout")]
    #[validate(range(min = 1, max = 120))]
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_weather_base_url() -> String {
    sources::OPEN_METEO_BASE_URL.to_string()
}

fn default_latitude() -> f64 {
    sources::DEFAULT_LATITUDE
}

fn default_longitude() -> f64 {
    sources::DEFAULT_LONGITUDE
}

fn default_water_temperature_url() -> String {
    sources::DEFAULT_WATER_TEMPERATURE_URL.to_string()
}

fn default_water_level_url() -> String {
    sources::DEFAULT_WATER_LEVEL_URL.to_string()
}

fn default_water_level_history_url() -> String {
    sources::DEFAULT_WATER_LEVEL_HISTORY_URL.to_string()
}

fn default_request_timeout() -> u64 {
    network::UPSTREAM_REQUEST_TIMEOUT_SECS
}

fn default_water_temperature_ttl() -> u64 {
    cache::DEFAULT_WATER_TEMPERATURE_TTL_SECS
}

fn default_water_level_ttl() -> u64 {
    cache::DEFAULT_WATER_LEVEL_TTL_SECS
}

fn default_predictor_url() -> String {
    sources::DEFAULT_PREDICTOR_URL.to_string()
}

fn default_predictor_timeout() -> u64 {
    network::PREDICTOR_TIMEOUT_SECS
}

fn default_metrics_port() -> u16 {
    monitor::DEFAULT_METRICS_PORT
}

fn default_monitor_interval() -> u64 {
    monitor::DEFAULT_INTERVAL_SECS
}

fn default_max_connections() -> u32 {
    database::DEFAULT_MAX_CONNECTIONS
}

fn default_min_connections() -> u32 {
    database::DEFAULT_MIN_CONNECTIONS
}

fn default_acquire_timeout() -> u64 {
    database::DEFAULT_ACQUIRE_TIMEOUT_SECS
}
