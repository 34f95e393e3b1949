// src/domain/diff.rs
//
// Set-difference comparison of two snapshots, keyed on listing id.

use chrono::NaiveDate;
use std::collections::HashSet;

use super::listing::Listing;
use super::snapshot::Snapshot;

/// Outcome of diffing two snapshots, generic over the bucket representation:
/// full record subsets for reporting, plain counts for cheap checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison<T> {
    pub current_date: NaiveDate,
    pub previous_date: NaiveDate,
    pub sold: T,
    pub new: T,
    pub remaining: T,
}

pub type RecordComparison = Comparison<Vec<Listing>>;
pub type CountComparison = Comparison<usize>;

/// Diffs `current` against `previous`.
///
/// `new` holds current records absent from the previous id set, `sold` holds
/// previous records absent from the current id set. `remaining` mirrors the
/// full current inventory (the current id set intersected with itself),
/// keeping the three buckets shaped alike. Every id of either snapshot lands
/// in exactly one of new / sold / current-and-previous.
pub fn diff_snapshots(current: &Snapshot, previous: &Snapshot) -> RecordComparison {
    let ids_current: HashSet<&str> = current.records.iter().map(|r| r.id.as_str()).collect();
    let ids_previous: HashSet<&str> = previous.records.iter().map(|r| r.id.as_str()).collect();

    let new: Vec<Listing> = current
        .records
        .iter()
        .filter(|r| !ids_previous.contains(r.id.as_str()))
        .cloned()
        .collect();
    let sold: Vec<Listing> = previous
        .records
        .iter()
        .filter(|r| !ids_current.contains(r.id.as_str()))
        .cloned()
        .collect();
    let remaining: Vec<Listing> = current
        .records
        .iter()
        .filter(|r| ids_current.contains(r.id.as_str()))
        .cloned()
        .collect();

    Comparison {
        current_date: current.date,
        previous_date: previous.date,
        sold,
        new,
        remaining,
    }
}

/// Reduces each bucket to its cardinality.
pub fn to_counts(compare: &RecordComparison) -> CountComparison {
    Comparison {
        current_date: compare.current_date,
        previous_date: compare.previous_date,
        sold: compare.sold.len(),
        new: compare.new.len(),
        remaining: compare.remaining.len(),
    }
}

/// True when the latest pairwise comparison shows any movement.
pub fn has_evolved(counts: &CountComparison) -> bool {
    counts.sold > 0 || counts.new > 0
}
