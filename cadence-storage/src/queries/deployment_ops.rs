use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use cadence_core::errors::{CadenceResult, StorageError};
use cadence_core::events::{DeployStatus, DeploymentEvent, EnvironmentId};
use cadence_core::models::{Environment, TimeWindow};
use cadence_core::traits::ChangeListDeploymentTime;

use super::{change_list_ops, fmt_ts, param_refs, parse_ts, push_window_clause};
use crate::to_storage_err;

/// Validate and insert a deployment, resolving the change list by commit
/// hash within the environment's project. The change list always belongs
/// to the same project as the environment because resolution is scoped to
/// it.
pub fn insert_deployment(
    conn: &Connection,
    environment: &Environment,
    commit_hash: &str,
    status: DeployStatus,
    time: DateTime<Utc>,
) -> CadenceResult<DeploymentEvent> {
    let change_list =
        change_list_ops::change_list_by_commit_hash(conn, environment.project_id, commit_hash)?
            .ok_or_else(|| StorageError::ChangeListNotFound {
                project_id: environment.project_id,
                commit_hash: commit_hash.to_string(),
            })?;

    if time < change_list.time {
        return Err(StorageError::DeploymentBeforeChangeList {
            deployment_time: time,
            change_list_time: change_list.time,
        }
        .into());
    }

    conn.execute(
        "INSERT INTO deployments (environment_id, change_list_id, status, time)
         VALUES (?1, ?2, ?3, ?4)",
        params![environment.id, change_list.id, status.as_str(), fmt_ts(time)],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(DeploymentEvent {
        id: conn.last_insert_rowid(),
        environment_id: environment.id,
        change_list_id: change_list.id,
        status,
        time,
    })
}

/// All deployments for an environment inside a window, time ascending.
pub fn deployments_in(
    conn: &Connection,
    environment_id: EnvironmentId,
    window: TimeWindow,
) -> CadenceResult<Vec<DeploymentEvent>> {
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(environment_id)];
    let mut sql = "SELECT id, environment_id, change_list_id, status, time
         FROM deployments WHERE environment_id = ?1"
        .to_string();
    push_window_clause(&mut sql, "time", window, &mut params);
    sql.push_str(" ORDER BY time ASC");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(param_refs(&params).as_slice(), |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        let (id, environment_id, change_list_id, status, time) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let status = DeployStatus::parse(&status)
            .ok_or_else(|| to_storage_err(format!("bad stored deploy status '{status}'")))?;
        result.push(DeploymentEvent {
            id,
            environment_id,
            change_list_id,
            status,
            time: parse_ts(&time)?,
        });
    }
    Ok(result)
}

/// Times of passed deployments for an environment, ascending.
pub fn passed_deployment_times_in(
    conn: &Connection,
    environment_id: EnvironmentId,
    window: TimeWindow,
) -> CadenceResult<Vec<DateTime<Utc>>> {
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(environment_id)];
    let mut sql = "SELECT time FROM deployments
         WHERE environment_id = ?1 AND status = 'pass'"
        .to_string();
    push_window_clause(&mut sql, "time", window, &mut params);
    sql.push_str(" ORDER BY time ASC");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(param_refs(&params).as_slice(), |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        let time = row.map_err(|e| to_storage_err(e.to_string()))?;
        result.push(parse_ts(&time)?);
    }
    Ok(result)
}

/// The earliest passed deployment per change list inside the window.
///
/// The store's fixed-width timestamp text makes `MIN(time)` chronological.
pub fn first_passed_deployment_times_in(
    conn: &Connection,
    environment_id: EnvironmentId,
    window: TimeWindow,
) -> CadenceResult<Vec<ChangeListDeploymentTime>> {
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(environment_id)];
    let mut sql = "SELECT change_list_id, MIN(time) FROM deployments
         WHERE environment_id = ?1 AND status = 'pass'"
        .to_string();
    push_window_clause(&mut sql, "time", window, &mut params);
    sql.push_str(" GROUP BY change_list_id ORDER BY change_list_id ASC");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(param_refs(&params).as_slice(), |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        let (change_list_id, time) = row.map_err(|e| to_storage_err(e.to_string()))?;
        result.push(ChangeListDeploymentTime {
            change_list_id,
            time: parse_ts(&time)?,
        });
    }
    Ok(result)
}
