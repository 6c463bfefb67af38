use super::factors::{compute_factor, is_night};
use super::models::{
    DelegatedPrediction, DelegatedPredictor, DelegationError, HeuristicPrediction,
    PredictionError, PredictionParams, PredictionQuery, PredictionResult, PredictionSource,
};
use crate::conditions::{ConditionsService, WeatherReading};
use crate::constants::prediction::{DAY_BASE_RATE, NIGHT_BASE_RATE, UNKNOWN_WEATHER_CONDITION};
use crate::database::ObservationStore;
use crate::metrics::PredictionMetrics;
use chrono::{Local, Timelike};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Turns a request into a surfer count.
///
/// The historical mean for the hour is scaled by the heuristic factor; that
/// result is always computed and is what gets returned whenever the
/// delegated predictor is disabled or fails. Only a failing store aborts.
pub struct PredictionService {
    store: Arc<dyn ObservationStore>,
    conditions: Arc<ConditionsService>,
    predictor: Option<Arc<dyn DelegatedPredictor>>,
    predictor_timeout: Duration,
}

impl PredictionService {
    pub fn new(
        store: Arc<dyn ObservationStore>,
        conditions: Arc<ConditionsService>,
        predictor: Option<Arc<dyn DelegatedPredictor>>,
        predictor_timeout: Duration,
    ) -> Self {
        Self {
            store,
            conditions,
            predictor,
            predictor_timeout,
        }
    }

    /// Historical mean count for the hour, floored when history is missing or tiny
    pub async fn base_rate(&self, hour: u32) -> Result<f64, PredictionError> {
        let average = self.store.average_count_for_hour(hour).await?;

        match average {
            Some(avg) if avg >= 1.0 => Ok(avg),
            _ => {
                let floor = if is_night(hour) {
                    NIGHT_BASE_RATE
                } else {
                    DAY_BASE_RATE
                };
                debug!(
                    "No usable history for hour {} (avg {:?}), base rate floored to {}",
                    hour, average, floor
                );
                Ok(floor)
            }
        }
    }

    /// `round(base × factor)`, never negative
    pub fn heuristic(base_rate: f64, params: &PredictionParams) -> HeuristicPrediction {
        let weather = WeatherReading::new(
            params.air_temp.unwrap_or(0.0),
            params.weather_condition,
        );
        let factor = compute_factor(
            params.hour,
            params.water_temp,
            &weather,
            params.water_level,
            params.water_flow,
        );
        let count = (base_rate * factor).round().max(0.0) as u32;

        HeuristicPrediction {
            base_rate,
            factor,
            count,
        }
    }

    /// Ask the delegated predictor, bounded by the configured timeout.
    ///
    /// Negative counts clamp to zero; counts beyond `u32` are a malformed answer.
    async fn delegate(
        &self,
        predictor: &dyn DelegatedPredictor,
        params: &PredictionParams,
    ) -> Result<(u32, DelegatedPrediction), DelegationError> {
        let features = params.features();
        let delegated =
            match tokio::time::timeout(self.predictor_timeout, predictor.predict(&features)).await
            {
                Ok(result) => result?,
                Err(_) => return Err(DelegationError::Timeout(self.predictor_timeout.as_secs())),
            };

        let count = u32::try_from(delegated.surfer_count.max(0)).map_err(|_| {
            DelegationError::Parse(format!(
                "surfer_count {} out of range",
                delegated.surfer_count
            ))
        })?;

        Ok((count, delegated))
    }

    /// Predict from fully resolved params
    pub async fn predict(
        &self,
        params: PredictionParams,
    ) -> Result<PredictionResult, PredictionError> {
        params.validate()?;

        let base_rate = self.base_rate(params.hour).await?;
        let heuristic = Self::heuristic(base_rate, &params);
        debug!(
            "Heuristic prediction for hour {}: base={:.2} factor={:.2} count={}",
            params.hour, heuristic.base_rate, heuristic.factor, heuristic.count
        );

        let (prediction, source, explanation) = match &self.predictor {
            Some(predictor) => match self.delegate(predictor.as_ref(), &params).await {
                Ok((count, delegated)) => {
                    if let Some(explanation) = &delegated.explanation {
                        for (feature, contribution) in explanation {
                            debug!("  {}: {:.2}", feature, contribution);
                        }
                    }
                    (count, PredictionSource::Delegated, delegated.explanation)
                }
                Err(e) => {
                    warn!(
                        "Delegated predictor '{}' failed, using heuristic prediction {}: {}",
                        predictor.name(),
                        heuristic.count,
                        e
                    );
                    PredictionMetrics::record_delegation_failure(e.kind());
                    (heuristic.count, PredictionSource::Heuristic, None)
                }
            },
            None => (heuristic.count, PredictionSource::Heuristic, None),
        };

        info!(
            "Predicted {} surfer(s) for hour {} ({})",
            prediction,
            params.hour,
            source.as_str()
        );
        PredictionMetrics::record_prediction(source, prediction);

        Ok(PredictionResult {
            hour: params.hour,
            water_temperature: params.water_temp,
            air_temperature: params.air_temp,
            weather_condition: params.weather_condition,
            water_level: params.water_level,
            water_flow: params.water_flow,
            prediction,
            source,
            explanation,
            heuristic,
        })
    }

    /// Fill missing query values from the current conditions
    pub async fn resolve(&self, query: PredictionQuery) -> PredictionParams {
        let hour = query.hour.unwrap_or_else(|| Local::now().hour());
        let needs_weather = query.air_temp.is_none() || query.weather_condition.is_none();

        let water_temp = async {
            match query.water_temp {
                Some(t) => Some(t),
                None => self
                    .conditions
                    .cached_water_temperature()
                    .await
                    .map_err(|e| warn!("Water temperature unavailable: {}", e))
                    .ok(),
            }
        };
        let weather = async {
            if !needs_weather {
                return None;
            }
            self.conditions
                .try_current_weather()
                .await
                .map_err(|e| warn!("Could not fetch current weather: {}", e))
                .ok()
        };
        let level = self.conditions.latest_water_level_and_flow();

        let (water_temp, weather, level) = tokio::join!(water_temp, weather, level);

        let (water_level, water_flow) = match level {
            Ok(reading) => (reading.level, reading.flow),
            Err(e) => {
                warn!("Failed to fetch water level, falling back to 0: {}", e);
                (0.0, 0.0)
            }
        };

        PredictionParams {
            hour,
            water_temp,
            air_temp: query.air_temp.or(weather.map(|w| w.temperature)),
            weather_condition: query
                .weather_condition
                .or(weather.map(|w| w.condition_code))
                .unwrap_or(UNKNOWN_WEATHER_CONDITION),
            water_level,
            water_flow,
        }
    }

    /// Resolve the query against current conditions, then predict
    pub async fn predict_current(
        &self,
        query: PredictionQuery,
    ) -> Result<PredictionResult, PredictionError> {
        if let Some(hour) = query.hour {
            PredictionParams::for_hour(hour).validate()?;
        }
        let params = self.resolve(query).await;
        self.predict(params).await
    }
}
