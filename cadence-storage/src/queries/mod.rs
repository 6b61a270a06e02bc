//! Read and write queries, one module per event table. All functions take
//! a borrowed connection; the engine owns locking.

pub mod change_list_ops;
pub mod coverage_ops;
pub mod deployment_ops;
pub mod environment_ops;
pub mod service_status_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use cadence_core::errors::CadenceResult;
use cadence_core::models::TimeWindow;

use crate::to_storage_err;

/// Format a timestamp in the store's canonical fixed-width form
/// (RFC3339, microseconds, `Z` suffix). Lexicographic order of these
/// strings equals chronological order.
pub(crate) fn fmt_ts(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a timestamp stored by [`fmt_ts`].
pub(crate) fn parse_ts(s: &str) -> CadenceResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad stored timestamp '{s}': {e}")))
}

/// Append `AND <column> >= start` / `AND <column> < end` clauses for a
/// half-open window, pushing the bound values onto `params`. Parameter
/// indexes continue from whatever is already in `params`.
pub(crate) fn push_window_clause(
    sql: &mut String,
    column: &str,
    window: TimeWindow,
    params: &mut Vec<Box<dyn rusqlite::types::ToSql>>,
) {
    if let Some(start) = window.start {
        params.push(Box::new(fmt_ts(start)));
        sql.push_str(&format!(" AND {column} >= ?{}", params.len()));
    }
    params.push(Box::new(fmt_ts(window.end)));
    sql.push_str(&format!(" AND {column} < ?{}", params.len()));
}

/// Borrow a boxed param list the way rusqlite wants it.
pub(crate) fn param_refs(
    params: &[Box<dyn rusqlite::types::ToSql>],
) -> Vec<&dyn rusqlite::types::ToSql> {
    params.iter().map(|p| p.as_ref()).collect()
}
