//! Mock collaborators for testing

use crate::conditions::{
    FetchError, HistoricalWaterLevel, WaterLevelFlow, WaterLevelHistorySource, WaterLevelSource,
    WaterTemperatureSource, WeatherReading, WeatherSource,
};
use crate::database::{ObservationStore, StoreError, SurferObservation};
use crate::prediction::{
    DelegatedPrediction, DelegatedPredictor, DelegationError, PredictionFeatures,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// Upstream source returning a configurable result and counting calls
#[derive(Debug)]
pub struct MockSource<T> {
    response: RwLock<Result<T, FetchError>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

pub type MockWeatherSource = MockSource<WeatherReading>;
pub type MockWaterTemperatureSource = MockSource<f64>;
pub type MockWaterLevelSource = MockSource<WaterLevelFlow>;
pub type MockWaterLevelHistorySource = MockSource<Vec<HistoricalWaterLevel>>;

impl<T: Clone> MockSource<T> {
    pub fn succeeding(value: T) -> Self {
        Self {
            response: RwLock::new(Ok(value)),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            response: RwLock::new(Err(error)),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Sleep this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_value(&self, value: T) {
        *self.response.write().unwrap() = Ok(value);
    }

    pub fn set_error(&self, error: FetchError) {
        *self.response.write().unwrap() = Err(error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self) -> Result<T, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.read().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl WeatherSource for MockSource<WeatherReading> {
    async fn fetch_current_weather(&self) -> Result<WeatherReading, FetchError> {
        self.respond().await
    }

    fn name(&self) -> &str {
        "mock-weather"
    }
}

#[async_trait::async_trait]
impl WaterTemperatureSource for MockSource<f64> {
    async fn fetch_water_temperature(&self) -> Result<f64, FetchError> {
        self.respond().await
    }

    fn name(&self) -> &str {
        "mock-water-temperature"
    }
}

#[async_trait::async_trait]
impl WaterLevelSource for MockSource<WaterLevelFlow> {
    async fn fetch_water_level_and_flow(&self) -> Result<WaterLevelFlow, FetchError> {
        self.respond().await
    }

    fn name(&self) -> &str {
        "mock-water-level"
    }
}

#[async_trait::async_trait]
impl WaterLevelHistorySource for MockSource<Vec<HistoricalWaterLevel>> {
    async fn fetch_water_level_history(&self) -> Result<Vec<HistoricalWaterLevel>, FetchError> {
        self.respond().await
    }

    fn name(&self) -> &str {
        "mock-water-level-history"
    }
}

/// Delegated predictor with a configurable answer
#[derive(Debug)]
pub struct MockPredictor {
    response: RwLock<Result<DelegatedPrediction, DelegationError>>,
    last_features: RwLock<Option<PredictionFeatures>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl MockPredictor {
    pub fn succeeding(surfer_count: i64) -> Self {
        Self::with_response(Ok(DelegatedPrediction {
            surfer_count,
            explanation: None,
        }))
    }

    pub fn failing(error: DelegationError) -> Self {
        Self::with_response(Err(error))
    }

    pub fn with_response(response: Result<DelegatedPrediction, DelegationError>) -> Self {
        Self {
            response: RwLock::new(response),
            last_features: RwLock::new(None),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Features of the most recent call
    pub fn last_features(&self) -> Option<PredictionFeatures> {
        self.last_features.read().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DelegatedPredictor for MockPredictor {
    async fn predict(
        &self,
        features: &PredictionFeatures,
    ) -> Result<DelegatedPrediction, DelegationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_features.write().unwrap() = Some(features.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.read().unwrap().clone()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Store that is never reachable
#[derive(Debug, Default)]
pub struct UnavailableStore;

#[async_trait::async_trait]
impl ObservationStore for UnavailableStore {
    async fn average_count_for_hour(&self, _hour: u32) -> Result<Option<f64>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn insert_observation(&self, _observation: &SurferObservation) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn list_observations(&self) -> Result<Vec<SurferObservation>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
