// src/db/events.rs

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::domain::events::{Event, EventRecord};

use super::connection::StoreError;

/// An event as persisted in the journal.
#[derive(Debug, PartialEq)]
pub struct StoredEvent {
    pub id: i64,
    pub listing_id: String,
    pub kind: String,
    pub event_date: NaiveDateTime,
}

/// Journals the events, skipping any (listing, kind, date) combination
/// already present. Re-running the extraction over the same snapshot folder
/// therefore inserts nothing new. Returns the number of fresh rows.
pub fn save_events(conn: &mut Connection, events: &[Event]) -> Result<usize, StoreError> {
    let tx = conn
        .transaction()
        .map_err(|e| StoreError::Query(e.to_string()))?;

    let mut inserted = 0;
    for event in events {
        let record = EventRecord::from_event(event);
        inserted += tx
            .execute(
                "INSERT OR IGNORE INTO listing_events (listing_id, kind, event_date) VALUES (?1, ?2, ?3)",
                params![record.listing_id, record.kind.as_str(), record.date],
            )
            .map_err(|e| StoreError::Query(e.to_string()))?;
    }

    tx.commit().map_err(|e| StoreError::Query(e.to_string()))?;
    Ok(inserted)
}

pub fn recent_events(conn: &Connection, limit: i64) -> Result<Vec<StoredEvent>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, listing_id, kind, event_date
             FROM listing_events ORDER BY event_date DESC, id DESC LIMIT ?",
        )
        .map_err(|e| StoreError::Query(e.to_string()))?;

    let rows = stmt
        .query_map([limit], |row| {
            Ok(StoredEvent {
                id: row.get(0)?,
                listing_id: row.get(1)?,
                kind: row.get(2)?,
                event_date: row.get(3)?,
            })
        })
        .map_err(|e| StoreError::Query(e.to_string()))?;

    let mut events = Vec::new();
    for row in rows {
        events.push(row.map_err(|e| StoreError::Query(e.to_string()))?);
    }
    Ok(events)
}
