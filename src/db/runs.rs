// src/db/runs.rs

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use super::connection::StoreError;

/// One journaled watch run, successful or not.
#[derive(Debug)]
pub struct WatchRun {
    pub id: i64,
    pub started_at: NaiveDateTime,
    pub finished_at: Option<NaiveDateTime>,
    pub snapshot_date: Option<NaiveDate>,
    pub listings_seen: Option<i64>,
    pub success: bool,
    pub error_message: Option<String>,
}

pub fn start_run(conn: &Connection, started_at: NaiveDateTime) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO watch_runs (started_at, success) VALUES (?, 0)",
        params![started_at],
    )
    .map_err(|e| StoreError::Query(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

pub fn finish_run(
    conn: &Connection,
    run_id: i64,
    finished_at: NaiveDateTime,
    snapshot_date: Option<NaiveDate>,
    listings_seen: Option<i64>,
    success: bool,
    error_message: Option<String>,
) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE watch_runs SET finished_at = ?, snapshot_date = ?, listings_seen = ?, success = ?, error_message = ? WHERE id = ?",
        params![finished_at, snapshot_date, listings_seen, success, error_message, run_id],
    )
    .map_err(|e| StoreError::Query(e.to_string()))?;
    Ok(())
}

pub fn recent_runs(conn: &Connection, limit: i64) -> Result<Vec<WatchRun>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, started_at, finished_at, snapshot_date, listings_seen, success, error_message
             FROM watch_runs ORDER BY started_at DESC LIMIT ?",
        )
        .map_err(|e| StoreError::Query(e.to_string()))?;

    let rows = stmt
        .query_map([limit], |row| {
            Ok(WatchRun {
                id: row.get(0)?,
                started_at: row.get(1)?,
                finished_at: row.get(2)?,
                snapshot_date: row.get(3)?,
                listings_seen: row.get(4)?,
                success: row.get(5)?,
                error_message: row.get(6)?,
            })
        })
        .map_err(|e| StoreError::Query(e.to_string()))?;

    let mut runs = Vec::new();
    for row in rows {
        runs.push(row.map_err(|e| StoreError::Query(e.to_string()))?);
    }
    Ok(runs)
}
