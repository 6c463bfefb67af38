pub mod factors;
pub mod models;
pub mod monitor;
pub mod predictor;
pub mod service;


pub use factors::compute_factor;
pub use models::{
    DelegatedPrediction, DelegatedPredictor, DelegationError, HeuristicPrediction,
    PredictionError, PredictionFeatures, PredictionParams, PredictionQuery, PredictionResult,
    PredictionSource,
};
pub use monitor::PredictionMonitor;
pub use predictor::HttpPredictor;
pub use service::PredictionService;
