//! Database module
//!
//! Persistence for the portal:
//! - Pool creation and the `kv_store` schema
//! - The collection [`Store`] and typed [`Collection`] handles
//! - Entity models
//! - First-run seeding

pub mod collection;
pub mod models;
pub mod schema;
pub mod seed;
pub mod store;

pub use collection::{shallow_merge, Collection, Record};
pub use models::*;
pub use schema::{initialize_database, schema_version};
pub use seed::ensure_seeded;
pub use store::Store;

use crate::config::{DB_BUSY_TIMEOUT_SECS, DB_POOL_SIZE};
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

fn connect_options(db_path: &Path) -> std::result::Result<SqliteConnectOptions, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?;

    Ok(options
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(DB_BUSY_TIMEOUT_SECS))
        .journal_mode(SqliteJournalMode::Wal))
}

/// Open the on-disk database at `db_path`, creating it and its parent
/// directory on first run, and bring the schema up to date.
pub async fn create_pool(db_path: &Path) -> Result<SqlitePool> {
    tracing::info!("Opening store at {:?}", db_path);

    // A bare file name has an empty parent
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    // Migrate on a single connection, then close it so that no pooled
    // connection was opened against the old schema
    let migration_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options(db_path)?)
        .await?;
    initialize_database(&migration_pool).await?;
    migration_pool.close().await;

    let pool = SqlitePoolOptions::new()
        .max_connections(DB_POOL_SIZE)
        .connect_with(connect_options(db_path)?)
        .await?;

    tracing::info!("Store ready ({} connections)", DB_POOL_SIZE);
    Ok(pool)
}

/// A private, migrated in-memory database.
///
/// Every SQLite connection to `:memory:` is a separate database, so the
/// pool is capped at one connection.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    initialize_database(&pool).await?;
    Ok(pool)
}
