use crate::conditions::{
    cache::TtlCache,
    models::{
        ConditionsSnapshot, FetchError, HistoricalWaterLevel, WaterLevelFlow,
        WaterLevelHistorySource, WaterLevelSource, WaterReading, WaterTemperatureSource,
        WeatherReading, WeatherSource,
    },
};
use crate::metrics::ConditionsMetrics;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// TTLs and timeout for the conditions facade
#[derive(Debug, Clone)]
pub struct ConditionsSettings {
    pub water_temperature_ttl: Duration,
    pub water_level_ttl: Duration,
    pub fetch_timeout: Duration,
}

/// Current environmental readings for the predictor.
///
/// Weather and water temperature only nudge the heuristic, so their failures
/// are absorbed here (default reading, stale cache). Level and flow feed the
/// business value directly, so their failures are handed to the caller.
pub struct ConditionsService {
    weather: Arc<dyn WeatherSource>,
    water_temperature: Arc<dyn WaterTemperatureSource>,
    water_level: Arc<dyn WaterLevelSource>,
    water_level_history: Option<Arc<dyn WaterLevelHistorySource>>,
    water_temperature_cache: TtlCache<WaterReading>,
    water_level_cache: TtlCache<WaterLevelFlow>,
    fetch_timeout: Duration,
}

impl ConditionsService {
    pub fn new(
        weather: Arc<dyn WeatherSource>,
        water_temperature: Arc<dyn WaterTemperatureSource>,
        water_level: Arc<dyn WaterLevelSource>,
        settings: ConditionsSettings,
    ) -> Self {
        Self {
            weather,
            water_temperature,
            water_level,
            water_level_history: None,
            water_temperature_cache: TtlCache::new(
                "water_temperature",
                settings.water_temperature_ttl,
            ),
            water_level_cache: TtlCache::new("water_level", settings.water_level_ttl),
            fetch_timeout: settings.fetch_timeout,
        }
    }

    /// Attach the source behind [`Self::water_level_history`]
    pub fn with_water_level_history(mut self, source: Arc<dyn WaterLevelHistorySource>) -> Self {
        self.water_level_history = Some(source);
        self
    }

    /// Run an upstream fetch under the facade timeout, recording the outcome
    async fn bounded<T, Fut>(&self, source: &str, fetch: Fut) -> Result<T, FetchError>
    where
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let start = Instant::now();
        let result = match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.fetch_timeout.as_secs())),
        };

        let status = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        ConditionsMetrics::record_upstream_fetch(source, status, start.elapsed());

        result
    }

    /// Fetch the weather, surfacing failures
    pub async fn try_current_weather(&self) -> Result<WeatherReading, FetchError> {
        self.bounded(self.weather.name(), self.weather.fetch_current_weather())
            .await
    }

    /// Current weather, or [`WeatherReading::unknown`] when the source fails
    pub async fn current_weather(&self) -> WeatherReading {
        match self.try_current_weather().await {
            Ok(reading) => reading,
            Err(e) => {
                warn!("Could not fetch current weather, using default: {}", e);
                WeatherReading::unknown()
            }
        }
    }

    /// Water temperature from the cache, refreshed when older than its TTL
    pub async fn cached_water_temperature(&self) -> Result<f64, FetchError> {
        let reading = self
            .water_temperature_cache
            .get_or_fetch(|| async {
                let temperature = self
                    .bounded(
                        self.water_temperature.name(),
                        self.water_temperature.fetch_water_temperature(),
                    )
                    .await?;
                Ok::<_, FetchError>(WaterReading { temperature })
            })
            .await?;

        Ok(reading.temperature)
    }

    /// Water temperature straight from the source, bypassing the cache
    pub async fn latest_water_temperature(&self) -> Result<f64, FetchError> {
        self.bounded(
            self.water_temperature.name(),
            self.water_temperature.fetch_water_temperature(),
        )
        .await
    }

    /// Fresh level and flow; failures are returned, never defaulted
    pub async fn latest_water_level_and_flow(&self) -> Result<WaterLevelFlow, FetchError> {
        self.bounded(
            self.water_level.name(),
            self.water_level.fetch_water_level_and_flow(),
        )
        .await
    }

    /// Level and flow through the level cache, for callers that accept staleness
    pub async fn cached_water_level_and_flow(&self) -> Result<WaterLevelFlow, FetchError> {
        self.water_level_cache
            .get_or_fetch(|| self.latest_water_level_and_flow())
            .await
    }

    /// Recent gauge levels as published, uncached; failures are returned
    pub async fn water_level_history(&self) -> Result<Vec<HistoricalWaterLevel>, FetchError> {
        let source = self
            .water_level_history
            .as_ref()
            .ok_or(FetchError::NotConfigured("water level history"))?;

        self.bounded(source.name(), source.fetch_water_level_history())
            .await
    }

    /// All readings fetched concurrently
    pub async fn snapshot(&self) -> ConditionsSnapshot {
        let (weather, water_temperature, water_level) = tokio::join!(
            self.current_weather(),
            self.cached_water_temperature(),
            self.latest_water_level_and_flow(),
        );

        let water_temperature = water_temperature
            .map_err(|e| warn!("Water temperature unavailable: {}", e))
            .ok();
        let water_level = water_level
            .map_err(|e| warn!("Water level/flow unavailable: {}", e))
            .ok();

        debug!(
            "Snapshot: weather={:?}, water_temperature={:?}, water_level={:?}",
            weather, water_temperature, water_level
        );

        ConditionsSnapshot {
            weather,
            weather_condition: weather.condition(),
            water_temperature,
            water_level,
        }
    }

    /// (name, TTL, age of held value) for each cache
    pub async fn cache_stats(&self) -> Vec<(String, Duration, Option<Duration>)> {
        vec![
            (
                self.water_temperature_cache.name().to_string(),
                self.water_temperature_cache.ttl(),
                self.water_temperature_cache.peek().await.map(|(_, age)| age),
            ),
            (
                self.water_level_cache.name().to_string(),
                self.water_level_cache.ttl(),
                self.water_level_cache.peek().await.map(|(_, age)| age),
            ),
        ]
    }
}
