//! PostgreSQL connection pool setup.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::config::Config;

/// Opens the connection pool, retrying with exponential backoff.
///
/// Each connection gets a server-side `statement_timeout`. The first attempt
/// is followed by up to `db_connect_retries` retries (500 ms, 1 s, 2 s, ...).
///
/// # Errors
///
/// Returns an error if the URL is malformed or every attempt fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.database_url)
        .context("Invalid database URL")?
        .options([(
            "statement_timeout",
            config.db_statement_timeout_ms.to_string(),
        )]);

    let pool_options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let strategy = ExponentialBackoff::from_millis(2)
        .factor(250)
        .max_delay(Duration::from_secs(10))
        .map(jitter)
        .take(config.db_connect_retries);

    let pool = Retry::spawn(strategy, || {
        let pool_options = pool_options.clone();
        let connect_options = connect_options.clone();
        async move {
            pool_options
                .connect_with(connect_options)
                .await
                .inspect_err(|e| tracing::warn!(error = %e, "Database connection attempt failed"))
        }
    })
    .await
    .context("Failed to connect to database")?;

    Ok(pool)
}
