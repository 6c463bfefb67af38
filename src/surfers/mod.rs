pub mod models;
pub mod service;

#[cfg(test)]
mod tests;

pub use models::{NewObservation, ObservationError};
pub use service::ObservationService;
