//! Schema versioning for the key-value store
//!
//! Migrations are numbered SQL files applied in order, each inside its own
//! transaction. The applied versions are recorded in `migrations`, so
//! reopening a database only runs what is new.

use crate::error::Result;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

/// Ordered migrations; versions must be strictly increasing
const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("migrations/001_initial_schema.sql"))];

/// Version the schema is at once every migration has run
pub const LATEST_VERSION: i32 = 1;

/// Bring the schema at `pool` up to [`LATEST_VERSION`]
pub async fn initialize_database(pool: &SqlitePool) -> Result<()> {
    // Readers keep working while a whole collection is rewritten
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    let current = schema_version(pool).await?;
    if current > LATEST_VERSION {
        // Written by a newer build; nothing here can be applied
        tracing::warn!(
            "Database schema version {} is newer than this build ({})",
            current,
            LATEST_VERSION
        );
        return Ok(());
    }

    let pending: Vec<_> = MIGRATIONS.iter().filter(|(v, _)| *v > current).collect();
    if pending.is_empty() {
        tracing::debug!("Schema up to date at version {}", current);
        return Ok(());
    }

    for (version, sql) in pending {
        apply_migration(pool, *version, sql).await?;
    }

    tracing::info!("Schema migrated from version {} to {}", current, LATEST_VERSION);
    Ok(())
}

/// Highest applied migration, 0 for a fresh database
pub async fn schema_version(pool: &SqlitePool) -> Result<i32> {
    let version: i32 = sqlx::query("SELECT COALESCE(MAX(version), 0) FROM migrations")
        .fetch_one(pool)
        .await?
        .get(0);
    Ok(version)
}

async fn apply_migration(pool: &SqlitePool, version: i32, sql: &str) -> Result<()> {
    tracing::info!("Applying migration {}", version);

    let mut tx = pool.begin().await?;

    for statement in statements(sql) {
        sqlx::query(&statement).execute(&mut *tx).await?;
    }

    // Recorded in the same transaction, so a failed migration is retried
    sqlx::query("INSERT INTO migrations (version) VALUES (?)")
        .bind(version)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Split a migration file into statements, dropping `--` comment lines
fn statements(sql: &str) -> Vec<String> {
    let code: String = sql
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    code.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
