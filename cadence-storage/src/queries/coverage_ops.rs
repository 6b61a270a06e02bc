use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use cadence_core::constants::{COVERAGE_VALUE_MAX, COVERAGE_VALUE_MIN};
use cadence_core::errors::{CadenceResult, StorageError};
use cadence_core::events::{CoverageEvent, CoverageKind, ProjectId};
use cadence_core::models::TimeWindow;
use cadence_core::traits::CoverageSample;

use super::{fmt_ts, param_refs, parse_ts, push_window_clause};
use crate::to_storage_err;

/// Record a coverage report. Reports carrying a non-empty version are
/// upserted: re-recording an existing `(project, kind, version)` replaces
/// the value and advances `last_update_time`; versionless reports always
/// insert a new row.
pub fn upsert_coverage_report(
    conn: &Connection,
    project_id: ProjectId,
    kind: CoverageKind,
    value: f64,
    version: Option<&str>,
    time: DateTime<Utc>,
) -> CadenceResult<CoverageEvent> {
    if !(COVERAGE_VALUE_MIN..=COVERAGE_VALUE_MAX).contains(&value) {
        return Err(StorageError::CoverageValueOutOfRange { value }.into());
    }
    // Normalize "" to a versionless report.
    let version = version.filter(|v| !v.is_empty());

    if let Some(version) = version {
        let existing: Option<(i64, String)> = conn
            .query_row(
                "SELECT id, recorded_at FROM coverage_reports
                 WHERE project_id = ?1 AND kind = ?2 AND version = ?3",
                params![project_id, kind.as_str(), version],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| to_storage_err(e.to_string()))?;

        if let Some((id, recorded_at)) = existing {
            conn.execute(
                "UPDATE coverage_reports SET value = ?1, last_update_time = ?2 WHERE id = ?3",
                params![value, fmt_ts(time), id],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            return Ok(CoverageEvent {
                id,
                project_id,
                kind,
                value,
                version: Some(version.to_string()),
                recorded_at: parse_ts(&recorded_at)?,
                last_update_time: time,
            });
        }
    }

    conn.execute(
        "INSERT INTO coverage_reports (project_id, kind, value, version, recorded_at, last_update_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            project_id,
            kind.as_str(),
            value,
            version,
            fmt_ts(time),
            fmt_ts(time)
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(CoverageEvent {
        id: conn.last_insert_rowid(),
        project_id,
        kind,
        value,
        version: version.map(str::to_string),
        recorded_at: time,
        last_update_time: time,
    })
}

/// Coverage samples of one kind inside a window, by `last_update_time`
/// ascending.
pub fn coverage_samples_in(
    conn: &Connection,
    project_id: ProjectId,
    kind: CoverageKind,
    window: TimeWindow,
) -> CadenceResult<Vec<CoverageSample>> {
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> =
        vec![Box::new(project_id), Box::new(kind.as_str())];
    let mut sql = "SELECT value, last_update_time FROM coverage_reports
         WHERE project_id = ?1 AND kind = ?2"
        .to_string();
    push_window_clause(&mut sql, "last_update_time", window, &mut params);
    sql.push_str(" ORDER BY last_update_time ASC");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(param_refs(&params).as_slice(), |row| {
            Ok((row.get::<_, f64>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        let (value, last_update_time) = row.map_err(|e| to_storage_err(e.to_string()))?;
        result.push(CoverageSample {
            value,
            last_update_time: parse_ts(&last_update_time)?,
        });
    }
    Ok(result)
}

/// The most recently updated coverage value inside a window, if any.
pub fn latest_coverage_value_in(
    conn: &Connection,
    project_id: ProjectId,
    kind: CoverageKind,
    window: TimeWindow,
) -> CadenceResult<Option<f64>> {
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> =
        vec![Box::new(project_id), Box::new(kind.as_str())];
    let mut sql = "SELECT value FROM coverage_reports
         WHERE project_id = ?1 AND kind = ?2"
        .to_string();
    push_window_clause(&mut sql, "last_update_time", window, &mut params);
    sql.push_str(" ORDER BY last_update_time DESC LIMIT 1");

    conn.query_row(&sql, param_refs(&params).as_slice(), |row| row.get(0))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Store-side mean of coverage values inside a window. `None` when the
/// window holds no reports.
pub fn average_coverage_value_in(
    conn: &Connection,
    project_id: ProjectId,
    kind: CoverageKind,
    window: TimeWindow,
) -> CadenceResult<Option<f64>> {
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> =
        vec![Box::new(project_id), Box::new(kind.as_str())];
    let mut sql = "SELECT AVG(value) FROM coverage_reports
         WHERE project_id = ?1 AND kind = ?2"
        .to_string();
    push_window_clause(&mut sql, "last_update_time", window, &mut params);

    conn.query_row(&sql, param_refs(&params).as_slice(), |row| {
        row.get::<_, Option<f64>>(0)
    })
    .map_err(|e| to_storage_err(e.to_string()))
}
