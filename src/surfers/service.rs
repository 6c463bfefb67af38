use super::models::{NewObservation, ObservationError};
use crate::conditions::ConditionsService;
use crate::database::{ObservationStore, SurferObservation};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Records user-submitted surfer counts together with the conditions at the time
pub struct ObservationService {
    store: Arc<dyn ObservationStore>,
    conditions: Arc<ConditionsService>,
}

impl ObservationService {
    pub fn new(store: Arc<dyn ObservationStore>, conditions: Arc<ConditionsService>) -> Self {
        Self { store, conditions }
    }

    /// Validate, enrich and persist one observation.
    ///
    /// Values the user supplied win over fetched ones. Conditions that cannot
    /// be fetched are stored as absent; only the store can fail the call.
    pub async fn record(
        &self,
        input: NewObservation,
    ) -> Result<SurferObservation, ObservationError> {
        if input.count < 0 {
            return Err(ObservationError::NegativeCount(input.count));
        }

        let timestamp = input.timestamp.unwrap_or_else(Utc::now);

        let weather = match self.conditions.try_current_weather().await {
            Ok(reading) => Some(reading),
            Err(e) => {
                warn!("Could not fetch air weather: {}", e);
                None
            }
        };

        let water_temperature = match input.water_temperature {
            Some(t) => Some(t),
            None => match self.conditions.cached_water_temperature().await {
                Ok(t) => Some(t),
                Err(e) => {
                    warn!("Could not fetch water temperature: {}", e);
                    None
                }
            },
        };

        let (mut water_level, mut water_flow) = (input.water_level, input.water_flow);
        if water_level.is_none() || water_flow.is_none() {
            match self.conditions.latest_water_level_and_flow().await {
                Ok(reading) => {
                    water_level = water_level.or(Some(reading.level));
                    water_flow = water_flow.or(Some(reading.flow));
                }
                Err(e) => warn!("Could not fetch water level/flow: {}", e),
            }
        }

        let observation = SurferObservation {
            timestamp,
            count: input.count,
            water_temperature,
            air_temperature: weather.map(|w| w.temperature),
            weather_condition: weather.map(|w| w.condition_code),
            water_level,
            water_flow,
        };

        self.store.insert_observation(&observation).await?;
        info!(
            "Recorded {} surfer(s) at {}",
            observation.count,
            observation.timestamp.to_rfc3339()
        );

        Ok(observation)
    }

    /// All observations, newest first
    pub async fn list(&self) -> Result<Vec<SurferObservation>, ObservationError> {
        Ok(self.store.list_observations().await?)
    }
}
