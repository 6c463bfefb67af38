use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use eisbach::cli::{self, Cli, Commands};
use eisbach::conditions::providers::{
    HndBayernHistorySource, HttpWaterTemperatureSource, OpenMeteoWeatherSource,
    PegelAlarmLevelSource,
};
use eisbach::conditions::ConditionsService;
use eisbach::config::{load_config_or_default, EisbachConfig};
use eisbach::database::{
    database_url, establish_connection, run_migrations, InMemoryObservationStore, ObservationStore,
    PgObservationStore,
};
use eisbach::metrics::start_metrics_server;
use eisbach::prediction::{
    DelegatedPredictor, HttpPredictor, PredictionMonitor, PredictionService,
};
use eisbach::surfers::ObservationService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads DATABASE_URL
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match load_config_or_default(cli.config.clone()) {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(anyhow::anyhow!("Configuration error: {}", e));
        }
    };

    let conditions = Arc::new(build_conditions(&config)?);
    let store = build_store(&config).await?;
    let predictor = build_predictor(&config)?;

    let predictions = Arc::new(PredictionService::new(
        store.clone(),
        conditions.clone(),
        predictor,
        config.predictor.timeout(),
    ));
    let observations = ObservationService::new(store, conditions.clone());

    match cli.command.unwrap_or(Commands::Monitor) {
        command @ Commands::Predict { .. } => {
            let query = command.prediction_query().unwrap_or_default();
            cli::handle_predict(&predictions, query).await?;
        }
        command @ Commands::Observe { .. } => {
            if let Some(input) = command.new_observation() {
                cli::handle_observe(&observations, input).await?;
            }
        }
        Commands::Entries => cli::handle_entries(&observations).await?,
        Commands::Conditions => cli::handle_conditions(&conditions).await?,
        Commands::History { limit } => cli::handle_history(&conditions, limit).await?,
        Commands::Monitor => {
            if config.metrics.enabled {
                start_metrics_server(config.metrics.port).await?;
            } else {
                info!("Metrics server disabled");
            }

            let monitor = PredictionMonitor::new(
                predictions,
                conditions,
                std::time::Duration::from_secs(config.monitor.interval_secs),
            );

            tokio::select! {
                _ = monitor.start() => {}
                _ = tokio::signal::ctrl_c() => info!("Shutting down"),
            }
        }
    }

    Ok(())
}

fn build_conditions(config: &EisbachConfig) -> Result<ConditionsService> {
    let sources = &config.sources;
    let timeout = sources.request_timeout();

    let weather = OpenMeteoWeatherSource::new(
        &sources.weather_base_url,
        sources.latitude,
        sources.longitude,
        timeout,
    )?;
    let water_temperature =
        HttpWaterTemperatureSource::new(sources.water_temperature_url.clone(), timeout)?;
    let water_level = PegelAlarmLevelSource::new(sources.water_level_url.clone(), timeout)?;
    let water_level_history =
        HndBayernHistorySource::new(sources.water_level_history_url.clone(), timeout)?;

    info!("Weather source: {}", weather.url());
    info!("Water temperature source: {}", sources.water_temperature_url);
    info!("Water level source: {}", sources.water_level_url);
    info!("Water level history source: {}", sources.water_level_history_url);

    Ok(ConditionsService::new(
        Arc::new(weather),
        Arc::new(water_temperature),
        Arc::new(water_level),
        config.conditions_settings(),
    )
    .with_water_level_history(Arc::new(water_level_history)))
}

/// Postgres when DATABASE_URL is set, otherwise an in-memory store
async fn build_store(config: &EisbachConfig) -> Result<Arc<dyn ObservationStore>> {
    if database_url().is_err() {
        warn!("DATABASE_URL not set, observations are kept in memory only");
        return Ok(Arc::new(InMemoryObservationStore::new()));
    }

    let pool = establish_connection(&config.database).await?;
    run_migrations(&pool).await?;

    Ok(Arc::new(PgObservationStore::new(pool)))
}

fn build_predictor(config: &EisbachConfig) -> Result<Option<Arc<dyn DelegatedPredictor>>> {
    if !config.predictor.enabled {
        info!("Delegated predictor disabled, using heuristic only");
        return Ok(None);
    }

    info!("Delegated predictor: {}", config.predictor.url);
    let predictor = HttpPredictor::new(config.predictor.url.clone(), config.predictor.timeout())?;

    Ok(Some(Arc::new(predictor)))
}
