#[cfg(test)]
mod tests {
    use crate::config::parser::{load_config, load_config_or_default, parse_config, ConfigError};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    // Helper function to create a temporary file with content
    fn create_temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_valid_configuration() {
        let config_yaml = r#"
        sources:
          weather_base_url: https://api.open-meteo.com/v1/forecast
          latitude: 48.143
          longitude: 11.588
          water_temperature_url: http://temperature.internal:8080/api/temperature
          water_level_url: https://api.pegelalarm.at/api/station/1.0/list?commonid=16515005-de
          water_level_history_url: https://www.hnd.bayern.de/pegel/isar/muenchen-himmelreichbruecke-16515005/tabelle?methode=wasserstand&days=7
          request_timeout_secs: 15

        cache:
          water_temperature_ttl_secs: 3600
          water_level_ttl_secs: 60

        predictor:
          enabled: true
          url: http://ml.internal:5001/predict
          timeout_secs: 3

        metrics:
          enabled: true
          port: 9100

        monitor:
          interval_secs: 120
        "#;

        let temp_file = create_temp_file(config_yaml);
        let config = load_config(temp_file.path()).expect("Failed to load valid config");

        assert_eq!(config.sources.latitude, 48.143);
        assert_eq!(config.sources.request_timeout(), Duration::from_secs(15));
        assert!(config.sources.water_level_history_url.ends_with("days=7"));
        assert_eq!(config.cache.water_temperature_ttl_secs, 3600);
        assert_eq!(config.predictor.url, "http://ml.internal:5001/predict");
        assert_eq!(config.predictor.timeout(), Duration::from_secs(3));
        assert!(config.metrics.enabled);
        assert_eq!(config.metrics.port, 9100);
        assert_eq!(config.monitor.interval_secs, 120);

        let settings = config.conditions_settings();
        assert_eq!(settings.water_temperature_ttl, Duration::from_secs(3600));
        assert_eq!(settings.water_level_ttl, Duration::from_secs(60));
        assert_eq!(settings.fetch_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_defaults_for_missing_sections() {
        let config = parse_config("predictor:\n  enabled: false\n").unwrap();

        assert!(!config.predictor.enabled);
        assert_eq!(config.cache.water_temperature_ttl_secs, 600);
        assert_eq!(config.cache.water_level_ttl_secs, 60);
        assert_eq!(config.sources.request_timeout_secs, 10);
        assert_eq!(
            config.sources.weather_base_url,
            "https://api.open-meteo.com/v1/forecast"
        );
        assert!(!config.metrics.enabled);
        assert_eq!(config.monitor.interval_secs, 300);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config("   \n").unwrap();
        assert!(config.predictor.enabled);
        assert_eq!(config.predictor.url, "http://localhost:5001/predict");
    }

    #[test]
    fn test_invalid_source_url_rejected() {
        let result = parse_config("sources:\n  water_level_url: not a url\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_history_url_rejected() {
        let result = parse_config("sources:\n  water_level_history_url: hnd.bayern.de/pegel\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_enabled_predictor_needs_valid_url() {
        let result = parse_config("predictor:\n  url: \"\"\n");
        assert!(matches!(result, Err(ConfigError::Other(_))));
    }

    #[test]
    fn test_disabled_predictor_ignores_url() {
        let config = parse_config("predictor:\n  enabled: false\n  url: \"\"\n").unwrap();
        assert!(!config.predictor.enabled);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let result = parse_config("cache:\n  water_temperature_ttl_secs: 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_latitude_out_of_range_rejected() {
        let result = parse_config("sources:\n  latitude: 123.0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_database_pool_settings() {
        let config = parse_config(
            "database:\n  max_connections: 12\n  min_connections: 2\n  acquire_timeout_secs: 8\n",
        )
        .unwrap();

        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.database.min_connections, 2);
        assert_eq!(config.database.acquire_timeout(), Duration::from_secs(8));
    }

    #[test]
    fn test_database_pool_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.database.acquire_timeout_secs, 5);
    }

    #[test]
    fn test_min_connections_above_max_rejected() {
        let result = parse_config("database:\n  max_connections: 2\n  min_connections: 3\n");
        assert!(matches!(result, Err(ConfigError::Other(_))));
    }

    #[test]
    fn test_malformed_yaml() {
        let result = parse_config("cache: [unclosed");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/definitely/not/here/config.yaml");
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let result = load_config_or_default(Some("/definitely/not/here.yaml".into()));
        assert!(result.is_err());
    }
}
