use super::models::SurferObservation;
use async_trait::async_trait;

/// Errors from the observation store; always fatal to the request
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence of surfer observations
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Mean count of all observations made during `hour`, `None` without rows
    async fn average_count_for_hour(&self, hour: u32) -> Result<Option<f64>, StoreError>;

    /// Append one observation
    async fn insert_observation(&self, observation: &SurferObservation) -> Result<(), StoreError>;

    /// All observations, newest first
    async fn list_observations(&self) -> Result<Vec<SurferObservation>, StoreError>;
}
