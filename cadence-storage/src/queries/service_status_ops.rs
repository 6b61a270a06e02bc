use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use cadence_core::errors::CadenceResult;
use cadence_core::events::{EnvironmentId, ServiceStatus, ServiceStatusEvent};
use cadence_core::models::TimeWindow;

use super::{fmt_ts, param_refs, parse_ts, push_window_clause};
use crate::to_storage_err;

/// Insert a service-status report.
pub fn insert_service_status(
    conn: &Connection,
    environment_id: EnvironmentId,
    status: ServiceStatus,
    time: DateTime<Utc>,
) -> CadenceResult<ServiceStatusEvent> {
    conn.execute(
        "INSERT INTO service_status_reports (environment_id, status, time)
         VALUES (?1, ?2, ?3)",
        params![environment_id, status.as_str(), fmt_ts(time)],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(ServiceStatusEvent {
        id: conn.last_insert_rowid(),
        environment_id,
        status,
        time,
    })
}

/// Service-status reports for an environment inside a window, time ascending.
pub fn service_status_in(
    conn: &Connection,
    environment_id: EnvironmentId,
    window: TimeWindow,
) -> CadenceResult<Vec<ServiceStatusEvent>> {
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(environment_id)];
    let mut sql = "SELECT id, environment_id, status, time
         FROM service_status_reports WHERE environment_id = ?1"
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
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        let (id, environment_id, status, time) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let status = ServiceStatus::parse(&status)
            .ok_or_else(|| to_storage_err(format!("bad stored service status '{status}'")))?;
        result.push(ServiceStatusEvent {
            id,
            environment_id,
            status,
            time: parse_ts(&time)?,
        });
    }
    Ok(result)
}
