//! v001 — environments plus the four event tables and their range indexes.
//!
//! Timestamps are stored as fixed-width RFC3339 text with microsecond
//! precision and a `Z` suffix, so lexicographic comparison equals
//! chronological comparison and half-open range scans can run on the
//! indexes directly.

use rusqlite::Connection;

pub fn apply(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE environments (
             id INTEGER PRIMARY KEY,
             project_id INTEGER NOT NULL,
             name TEXT NOT NULL
         );

         CREATE TABLE change_lists (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             project_id INTEGER NOT NULL,
             external_id TEXT NOT NULL,
             commit_hash TEXT NOT NULL,
             title TEXT,
             time TEXT NOT NULL,
             UNIQUE (project_id, external_id),
             UNIQUE (project_id, commit_hash)
         );
         CREATE INDEX idx_change_lists_project_time
             ON change_lists (project_id, time);

         CREATE TABLE deployments (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             environment_id INTEGER NOT NULL REFERENCES environments (id),
             change_list_id INTEGER NOT NULL REFERENCES change_lists (id),
             status TEXT NOT NULL CHECK (status IN ('pass', 'fail')),
             time TEXT NOT NULL
         );
         CREATE INDEX idx_deployments_environment_time
             ON deployments (environment_id, time);
         CREATE INDEX idx_deployments_environment_status_time
             ON deployments (environment_id, status, time);

         CREATE TABLE service_status_reports (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             environment_id INTEGER NOT NULL REFERENCES environments (id),
             status TEXT NOT NULL CHECK (status IN ('up', 'down')),
             time TEXT NOT NULL
         );
         CREATE INDEX idx_service_status_environment_time
             ON service_status_reports (environment_id, time);

         CREATE TABLE coverage_reports (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             project_id INTEGER NOT NULL,
             kind TEXT NOT NULL CHECK (kind IN ('overall', 'incremental')),
             value REAL NOT NULL,
             version TEXT,
             recorded_at TEXT NOT NULL,
             last_update_time TEXT NOT NULL
         );
         CREATE UNIQUE INDEX idx_coverage_project_kind_version
             ON coverage_reports (project_id, kind, version)
             WHERE version IS NOT NULL;
         CREATE INDEX idx_coverage_project_kind_updated
             ON coverage_reports (project_id, kind, last_update_time);",
    )
}
