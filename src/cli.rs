use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::conditions::ConditionsService;
use crate::error::EisbachError;
use crate::prediction::{PredictionQuery, PredictionService};
use crate::surfers::{NewObservation, ObservationService};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Eisbach - surfer count predictions for the Eisbach wave",
    long_about = "Eisbach predicts how many surfers are on the Eisbach wave in Munich. \
                  It combines the historical average for the hour with current weather, \
                  water temperature and river gauge readings, and records new counts \
                  submitted by surfers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Predict the surfer count, looking up anything not given
    Predict {
        /// Hour of day (0-23), defaults to the current hour
        #[arg(long)]
        hour: Option<u32>,

        /// Water temperature in °C
        #[arg(long)]
        water_temp: Option<f64>,

        /// Air temperature in °C
        #[arg(long, allow_hyphen_values = true)]
        air_temp: Option<f64>,

        /// WMO weather code
        #[arg(long)]
        weather_condition: Option<i32>,
    },
    /// Record an observed surfer count
    Observe {
        /// Number of surfers seen
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        count: i32,

        /// RFC 3339 time of the observation, defaults to now
        #[arg(long)]
        timestamp: Option<DateTime<Utc>>,

        #[arg(long)]
        water_temp: Option<f64>,

        /// Gauge level in cm
        #[arg(long)]
        water_level: Option<f64>,

        /// Discharge in m³/s
        #[arg(long)]
        water_flow: Option<f64>,
    },
    /// List recorded observations, newest first
    Entries,
    /// Show current weather, water temperature and gauge readings
    Conditions,
    /// Show recent gauge levels from the HND Bayern table
    History {
        /// Only the newest N rows
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Predict the current hour periodically (default behavior)
    Monitor,
}

impl Commands {
    /// Query for the `predict` command
    pub fn prediction_query(&self) -> Option<PredictionQuery> {
        match self {
            Commands::Predict {
                hour,
                water_temp,
                air_temp,
                weather_condition,
            } => Some(PredictionQuery {
                hour: *hour,
                water_temp: *water_temp,
                air_temp: *air_temp,
                weather_condition: *weather_condition,
            }),
            _ => None,
        }
    }

    /// Submission for the `observe` command
    pub fn new_observation(&self) -> Option<NewObservation> {
        match self {
            Commands::Observe {
                count,
                timestamp,
                water_temp,
                water_level,
                water_flow,
            } => Some(NewObservation {
                count: *count,
                timestamp: *timestamp,
                water_temperature: *water_temp,
                water_level: *water_level,
                water_flow: *water_flow,
            }),
            _ => None,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), EisbachError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn handle_predict(
    predictions: &PredictionService,
    query: PredictionQuery,
) -> Result<(), EisbachError> {
    let result = predictions.predict_current(query).await?;
    print_json(&result)
}

pub async fn handle_observe(
    observations: &ObservationService,
    input: NewObservation,
) -> Result<(), EisbachError> {
    let observation = observations.record(input).await?;
    print_json(&observation)
}

pub async fn handle_entries(observations: &ObservationService) -> Result<(), EisbachError> {
    let entries = observations.list().await?;
    if entries.is_empty() {
        println!("No observations recorded yet");
        return Ok(());
    }
    print_json(&entries)
}

pub async fn handle_conditions(conditions: &ConditionsService) -> Result<(), EisbachError> {
    let snapshot = conditions.snapshot().await;
    print_json(&snapshot)
}

pub async fn handle_history(
    conditions: &ConditionsService,
    limit: Option<usize>,
) -> Result<(), EisbachError> {
    let mut history = conditions.water_level_history().await?;
    if let Some(limit) = limit {
        history.truncate(limit);
    }
    print_json(&history)
}
