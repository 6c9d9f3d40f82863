//! Persistence layer: SQLite-backed robot/snapshot repository.
//!
//! The repository is the exclusive owner of both entity tables; every
//! logical operation runs in a single transaction and `PRAGMA
//! foreign_keys = ON` makes the storage engine the final authority on
//! referential integrity.

pub mod models;
pub mod repository;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::AppConfig;

pub use repository::SnapshotRepository;

/// Opens the connection pool and applies pending migrations.
///
/// Busy and acquire timeouts are bounded so no repository call can hang
/// indefinitely on a contended database.
///
/// # Errors
///
/// Returns an error when the database cannot be opened or a migration
/// fails to apply.
pub async fn connect(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.database_busy_timeout_secs));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(config.database_acquire_timeout_secs))
        .connect_with(options)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}
