//! Connection pool setup and schema migrations.

use anyhow::{Context, Result};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tokio_retry::{
    Retry,
    strategy::{ExponentialBackoff, jitter},
};

use crate::config::{Config, mask_connection_string};

/// Builds pool options from the `DB_*` settings.
pub fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
}

/// Opens the pool, retrying with jittered exponential backoff.
///
/// Makes `config.db_connect_retries` attempts in total.
pub async fn connect(config: &Config) -> Result<PgPool> {
    let strategy = ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(config.db_connect_retries.saturating_sub(1));

    let masked = mask_connection_string(&config.database_url);
    let mut attempt = 0usize;

    let pool = Retry::spawn(strategy, || {
        attempt += 1;
        let attempt = attempt;
        let masked = masked.as_str();
        async move {
            pool_options(config)
                .connect(&config.database_url)
                .await
                .inspect_err(|e| {
                    tracing::warn!(attempt, database = %masked, error = %e, "database connection failed");
                })
        }
    })
    .await
    .with_context(|| format!("Failed to connect to database at {masked}"))?;

    tracing::info!(database = %masked, "Connected to database");
    Ok(pool)
}

/// Applies pending migrations from `./migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");
    Ok(())
}
