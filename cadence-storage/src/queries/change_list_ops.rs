use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use cadence_core::constants::{CHANGE_LIST_ID_MAX_LENGTH, COMMIT_HASH_LENGTH, TITLE_MAX_LENGTH};
use cadence_core::errors::{CadenceResult, StorageError};
use cadence_core::events::{ChangeListEvent, ProjectId};
use cadence_core::models::TimeWindow;
use cadence_core::traits::ChangeListTime;

use super::{fmt_ts, param_refs, parse_ts, push_window_clause};
use crate::to_storage_err;

/// A change list waiting to be recorded.
#[derive(Debug, Clone)]
pub struct NewChangeList {
    pub external_id: String,
    pub commit_hash: String,
    pub title: Option<String>,
    pub time: DateTime<Utc>,
}

fn validate(project_id: ProjectId, conn: &Connection, new: &NewChangeList) -> CadenceResult<()> {
    if new.commit_hash.len() != COMMIT_HASH_LENGTH {
        return Err(StorageError::InvalidCommitHash {
            length: new.commit_hash.len(),
        }
        .into());
    }
    if new.external_id.is_empty() || new.external_id.len() > CHANGE_LIST_ID_MAX_LENGTH {
        return Err(to_storage_err(format!(
            "external id must be 1..={CHANGE_LIST_ID_MAX_LENGTH} characters"
        )));
    }
    if let Some(title) = &new.title {
        if title.len() > TITLE_MAX_LENGTH {
            return Err(to_storage_err(format!(
                "title longer than {TITLE_MAX_LENGTH} characters"
            )));
        }
    }

    let exists = |field: &'static str, value: &str| -> CadenceResult<()> {
        let found: Option<i64> = conn
            .query_row(
                &format!("SELECT id FROM change_lists WHERE project_id = ?1 AND {field} = ?2"),
                params![project_id, value],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| to_storage_err(e.to_string()))?;
        match found {
            Some(_) => Err(StorageError::DuplicateChangeList {
                project_id,
                field,
                value: value.to_string(),
            }
            .into()),
            None => Ok(()),
        }
    };
    exists("external_id", &new.external_id)?;
    exists("commit_hash", &new.commit_hash)?;
    Ok(())
}

/// Validate and insert one change list, returning the stored event.
pub fn insert_change_list(
    conn: &Connection,
    project_id: ProjectId,
    new: &NewChangeList,
) -> CadenceResult<ChangeListEvent> {
    validate(project_id, conn, new)?;
    conn.execute(
        "INSERT INTO change_lists (project_id, external_id, commit_hash, title, time)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            project_id,
            new.external_id,
            new.commit_hash,
            new.title,
            fmt_ts(new.time)
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(ChangeListEvent {
        id: conn.last_insert_rowid(),
        project_id,
        external_id: new.external_id.clone(),
        commit_hash: new.commit_hash.clone(),
        title: new.title.clone(),
        time: new.time,
    })
}

/// Insert a batch of change lists in one transaction.
pub fn insert_change_lists(
    conn: &Connection,
    project_id: ProjectId,
    batch: &[NewChangeList],
) -> CadenceResult<usize> {
    conn.execute_batch("BEGIN")
        .map_err(|e| to_storage_err(e.to_string()))?;
    for new in batch {
        if let Err(e) = insert_change_list(conn, project_id, new) {
            let _ = conn.execute_batch("ROLLBACK");
            return Err(e);
        }
    }
    conn.execute_batch("COMMIT")
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(batch.len())
}

/// Resolve a change list by commit hash within a project.
pub fn change_list_by_commit_hash(
    conn: &Connection,
    project_id: ProjectId,
    commit_hash: &str,
) -> CadenceResult<Option<ChangeListEvent>> {
    let row = conn
        .query_row(
            "SELECT id, project_id, external_id, commit_hash, title, time
             FROM change_lists WHERE project_id = ?1 AND commit_hash = ?2",
            params![project_id, commit_hash],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match row {
        Some((id, project_id, external_id, commit_hash, title, time)) => Ok(Some(ChangeListEvent {
            id,
            project_id,
            external_id,
            commit_hash,
            title,
            time: parse_ts(&time)?,
        })),
        None => Ok(None),
    }
}

/// Change-list creation times for a project inside a window, time ascending.
pub fn change_list_times_in(
    conn: &Connection,
    project_id: ProjectId,
    window: TimeWindow,
) -> CadenceResult<Vec<ChangeListTime>> {
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(project_id)];
    let mut sql =
        "SELECT id, time FROM change_lists WHERE project_id = ?1".to_string();
    push_window_clause(&mut sql, "time", window, &mut params);
    sql.push_str(" ORDER BY time ASC");

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
        result.push(ChangeListTime {
            change_list_id,
            time: parse_ts(&time)?,
        });
    }
    Ok(result)
}
