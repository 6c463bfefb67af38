use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use std::env;
use tracing::info;

use crate::config::DatabaseConfig;

pub type DatabasePool = Pool<Postgres>;

/// Read `DATABASE_URL`, failing with a hint when it is missing
pub fn database_url() -> Result<String> {
    env::var("DATABASE_URL").context("DATABASE_URL environment variable not set")
}

/// Open the observation database pool sized by `settings`
pub async fn establish_connection(settings: &DatabaseConfig) -> Result<DatabasePool> {
    let database_url = database_url()?;

    info!(
        "Connecting to observation database (pool {}..{}, acquire timeout {}s)",
        settings.min_connections, settings.max_connections, settings.acquire_timeout_secs
    );

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout())
        .connect(&database_url)
        .await
        .context("Failed to connect to the observation database")?;

    Ok(pool)
}

/// Create or upgrade the `surfer_entries` table
pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to migrate surfer_entries")?;

    info!("Observation schema is up to date");

    Ok(())
}
