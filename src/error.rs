use thiserror::Error;

#[derive(Debug, Error)]
pub enum EisbachError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::parser::ConfigError),

    #[error("Upstream error: {0}")]
    Fetch(#[from] crate::conditions::FetchError),

    #[error("Storage error: {0}")]
    Store(#[from] crate::database::StoreError),

    #[error("Prediction error: {0}")]
    Prediction(#[from] crate::prediction::PredictionError),

    #[error("Observation error: {0}")]
    Observation(#[from] crate::surfers::ObservationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
