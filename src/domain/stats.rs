// src/domain/stats.rs
//
// Per-listing aggregation across every capture: when a lot was first and
// last seen, how often, and how its price moved.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt;

use super::listing::{Listing, ListingCategory, Orientation};
use super::snapshot::Snapshot;

/// Aggregate of one listing over every snapshot it appears in. Descriptive
/// fields follow the latest occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingStats {
    pub id: String,
    pub category: ListingCategory,
    pub room_label: String,
    pub size_m2: i64,
    pub floor: i64,
    pub orientation: Orientation,
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
    pub times_seen: usize,
    pub price_start: f64,
    pub price_end: f64,
    /// Number of distinct consecutive prices, 1 when the price never moved.
    pub price_versions: usize,
}

/// Two records sharing an id within one snapshot. A data-quality failure of
/// the upstream extraction; aggregation refuses to pick one silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateIdError {
    pub id: String,
    pub date: NaiveDate,
}

impl fmt::Display for DuplicateIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "duplicate listing id '{}' in snapshot {}",
            self.id, self.date
        )
    }
}

impl Error for DuplicateIdError {}

/// Folds the snapshots, oldest first, into one stats row per listing id.
/// Output is sorted by id. Fails on the first duplicate id found within a
/// single snapshot.
pub fn aggregate_listing_stats(
    snapshots: &[Snapshot],
) -> Result<Vec<ListingStats>, DuplicateIdError> {
    let mut ordered: Vec<&Snapshot> = snapshots.iter().collect();
    ordered.sort_by_key(|s| s.date);

    let mut stats: BTreeMap<String, ListingStats> = BTreeMap::new();
    for snapshot in ordered {
        let mut seen: HashSet<&str> = HashSet::new();
        for record in &snapshot.records {
            if !seen.insert(record.id.as_str()) {
                return Err(DuplicateIdError {
                    id: record.id.clone(),
                    date: snapshot.date,
                });
            }
            match stats.get_mut(&record.id) {
                Some(entry) => update_entry(entry, record, snapshot.date),
                None => {
                    stats.insert(record.id.clone(), new_entry(record, snapshot.date));
                }
            }
        }
    }
    Ok(stats.into_values().collect())
}

fn new_entry(record: &Listing, date: NaiveDate) -> ListingStats {
    ListingStats {
        id: record.id.clone(),
        category: record.category,
        room_label: record.room_label.clone(),
        size_m2: record.size_m2,
        floor: record.floor,
        orientation: record.orientation,
        first_seen: date,
        last_seen: date,
        times_seen: 1,
        price_start: record.price,
        price_end: record.price,
        price_versions: 1,
    }
}

fn update_entry(entry: &mut ListingStats, record: &Listing, date: NaiveDate) {
    entry.last_seen = date;
    entry.times_seen += 1;
    if record.price != entry.price_end {
        entry.price_versions += 1;
    }
    entry.price_end = record.price;

    entry.category = record.category;
    entry.room_label = record.room_label.clone();
    entry.size_m2 = record.size_m2;
    entry.floor = record.floor;
    entry.orientation = record.orientation;
}
