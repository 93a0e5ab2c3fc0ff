//! SQLite-backed persistence.
//!
//! `init_database_with_retry` opens the pool and applies the embedded
//! migrations; `create_sqlite_repository` wraps the pool in the
//! [`Repository`](crate::domain::Repository) implementation.

mod sqlite_repository;

#[cfg(test)]
mod tests;

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub use sqlite_repository::{create_sqlite_repository, SqliteRepository};

/// Delay before the first reconnect attempt; doubles on each retry.
const INITIAL_BACKOFF: Duration = Duration::from_millis(100);
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Open the pool once and run migrations. Creates the database file when it
/// does not exist yet.
pub async fn init_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    // ---
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("invalid DATABASE_URL '{}'", config.database_url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(config.acquire_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    Ok(pool)
}

/// [`init_database`] with exponential backoff, up to `config.retry_count`
/// attempts.
pub async fn init_database_with_retry(config: &DatabaseConfig) -> Result<SqlitePool> {
    // ---
    let attempts = config.retry_count.max(1);
    let mut backoff = INITIAL_BACKOFF;
    let mut attempt = 1;

    loop {
        match init_database(config).await {
            Ok(pool) => {
                tracing::info!("Database ready at {}", config.database_url);
                return Ok(pool);
            }
            Err(err) if attempt < attempts => {
                tracing::warn!(
                    "Database init attempt {}/{} failed: {:#}; retrying in {:?}",
                    attempt,
                    attempts,
                    err,
                    backoff
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
                attempt += 1;
            }
            Err(err) => {
                tracing::error!("Database init failed after {} attempts: {:#}", attempts, err);
                return Err(err);
            }
        }
    }
}
