use rusqlite::{params, Connection, OptionalExtension};

use cadence_core::errors::CadenceResult;
use cadence_core::events::EnvironmentId;
use cadence_core::models::Environment;

use crate::to_storage_err;

/// Insert or replace an environment registration.
pub fn upsert_environment(conn: &Connection, environment: &Environment) -> CadenceResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO environments (id, project_id, name) VALUES (?1, ?2, ?3)",
        params![environment.id, environment.project_id, environment.name],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Look up an environment by id.
pub fn get_environment(
    conn: &Connection,
    id: EnvironmentId,
) -> CadenceResult<Option<Environment>> {
    conn.query_row(
        "SELECT id, project_id, name FROM environments WHERE id = ?1",
        params![id],
        |row| {
            Ok(Environment {
                id: row.get(0)?,
                project_id: row.get(1)?,
                name: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}
