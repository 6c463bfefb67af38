use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::SurferObservation;
use super::store::{ObservationStore, StoreError};

/// Observation store kept in process memory
#[derive(Default)]
pub struct InMemoryObservationStore {
    observations: RwLock<Vec<SurferObservation>>,
}

impl InMemoryObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observations(observations: Vec<SurferObservation>) -> Self {
        Self {
            observations: RwLock::new(observations),
        }
    }

    /// Remove every observation
    pub async fn clear(&self) {
        self.observations.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.observations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.observations.read().await.is_empty()
    }
}

#[async_trait]
impl ObservationStore for InMemoryObservationStore {
    async fn average_count_for_hour(&self, hour: u32) -> Result<Option<f64>, StoreError> {
        let observations = self.observations.read().await;
        let counts: Vec<f64> = observations
            .iter()
            .filter(|o| o.local_hour() == hour)
            .map(|o| o.count as f64)
            .collect();

        if counts.is_empty() {
            return Ok(None);
        }
        Ok(Some(counts.iter().sum::<f64>() / counts.len() as f64))
    }

    async fn insert_observation(&self, observation: &SurferObservation) -> Result<(), StoreError> {
        self.observations.write().await.push(observation.clone());
        Ok(())
    }

    async fn list_observations(&self) -> Result<Vec<SurferObservation>, StoreError> {
        let mut observations = self.observations.read().await.clone();
        observations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(observations)
    }
}
