use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;
use validator::Validate;

use super::models::EisbachConfig;

/// Errors that can occur during configuration parsing
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Other(String),
}

/// Provides default configuration file path
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".eisbach")
        .join("config.yaml")
}

/// Parses and validates a configuration document
pub fn parse_config(content: &str) -> Result<EisbachConfig, ConfigError> {
    // An empty document means "all defaults"
    let config: EisbachConfig = if content.trim().is_empty() {
        EisbachConfig::default()
    } else {
        serde_yaml::from_str(content)?
    };

    config.validate()?;

    if config.predictor.enabled && url::Url::parse(&config.predictor.url).is_err() {
        return Err(ConfigError::Other(format!(
            "predictor.url '{}' is not a valid URL while the predictor is enabled",
            config.predictor.url
        )));
    }

    if config.database.min_connections > config.database.max_connections {
        return Err(ConfigError::Other(format!(
            "database.min_connections ({}) exceeds database.max_connections ({})",
            config.database.min_connections, config.database.max_connections
        )));
    }

    Ok(config)
}

/// Loads and validates the Eisbach configuration
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<EisbachConfig, ConfigError> {
    let mut file = File::open(&config_path)?;

    let mut content = String::new();
    file.read_to_string(&mut content)?;

    parse_config(&content)
}

/// Loads an explicit path, else the default path if it exists, else defaults
pub fn load_config_or_default(config_path: Option<PathBuf>) -> Result<EisbachConfig, ConfigError> {
    match config_path {
        Some(path) => {
            info!("Using configuration file: {:?}", path);
            load_config(path)
        }
        None => {
            let path = default_config_path();
            if path.exists() {
                info!("Using configuration file: {:?}", path);
                load_config(path)
            } else {
                info!("No configuration file at {:?}, using defaults", path);
                Ok(EisbachConfig::default())
            }
        }
    }
}
