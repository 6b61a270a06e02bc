//! Schema migrations. Each version module applies one idempotent step;
//! `run_migrations` brings any database up to the current schema.

pub mod v001_event_tables;

use rusqlite::Connection;

use cadence_core::errors::{CadenceResult, StorageError};

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Apply all outstanding migrations to `conn`.
pub fn run_migrations(conn: &Connection) -> CadenceResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY,
             applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
         )",
    )
    .map_err(|e| migration_err(0, e))?;

    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(|e| migration_err(0, e))?;

    if current < 1 {
        v001_event_tables::apply(conn).map_err(|e| migration_err(1, e))?;
        record_version(conn, 1)?;
        tracing::debug!(version = 1, "applied migration");
    }

    Ok(())
}

fn record_version(conn: &Connection, version: u32) -> CadenceResult<()> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| migration_err(version, e))?;
    Ok(())
}

fn migration_err(version: u32, e: rusqlite::Error) -> cadence_core::errors::CadenceError {
    StorageError::MigrationFailed {
        version,
        reason: e.to_string(),
    }
    .into()
}
