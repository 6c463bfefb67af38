use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::models::SurferObservation;
use super::store::{ObservationStore, StoreError};

/// Postgres-backed observation store on the `surfer_entries` table
pub struct PgObservationStore {
    pool: PgPool,
}

impl PgObservationStore {
    /// Creates a new repository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObservationStore for PgObservationStore {
    async fn average_count_for_hour(&self, hour: u32) -> Result<Option<f64>, StoreError> {
        let average = sqlx::query_scalar::<_, Option<f64>>(
            r#"
            SELECT AVG(count)::DOUBLE PRECISION
            FROM surfer_entries
            WHERE local_hour = $1
            "#,
        )
        .bind(hour as i32)
        .fetch_one(&self.pool)
        .await?;

        debug!("Average surfer count for hour {}: {:?}", hour, average);

        Ok(average)
    }

    async fn insert_observation(&self, observation: &SurferObservation) -> Result<(), StoreError> {
        debug!(
            "Saving observation: timestamp={}, count={}, water_temp={:?}, air_temp={:?}, condition={:?}, level={:?}, flow={:?}",
            observation.timestamp,
            observation.count,
            observation.water_temperature,
            observation.air_temperature,
            observation.weather_condition,
            observation.water_level,
            observation.water_flow
        );

        sqlx::query(
            r#"
            INSERT INTO surfer_entries (
                timestamp,
                count,
                water_temperature,
                air_temperature,
                weather_condition,
                water_level,
                water_flow,
                local_hour
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(observation.timestamp)
        .bind(observation.count)
        .bind(observation.water_temperature)
        .bind(observation.air_temperature)
        .bind(observation.weather_condition)
        .bind(observation.water_level)
        .bind(observation.water_flow)
        .bind(observation.local_hour() as i32)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_observations(&self) -> Result<Vec<SurferObservation>, StoreError> {
        let records = sqlx::query_as::<_, SurferObservation>(
            r#"
            SELECT
                timestamp,
                count,
                water_temperature,
                air_temperature,
                weather_condition,
                water_level,
                water_flow
            FROM surfer_entries
            ORDER BY timestamp DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
