pub mod cli;
pub mod conditions;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod metrics;
pub mod prediction;
pub mod surfers;

#[cfg(test)]
pub mod test_utils;

pub use error::EisbachError;
