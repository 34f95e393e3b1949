// src/domain/events.rs
//
// Turns a set of snapshots into a flat, dated event log: one SOLD event per
// listing that disappeared between two consecutive captures, one PUBLISHED
// event per listing that appeared.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::diff::{diff_snapshots, RecordComparison};
use super::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Sold,
    Published,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Sold => "SOLD",
            EventKind::Published => "PUBLISHED",
        }
    }
}

/// A single inventory change. Created once by the extractor, never updated.
/// `date` is the capture date of the newer snapshot of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    pub listing_id: String,
    pub date: NaiveDate,
    pub kind: EventKind,
}

/// Row form of an [`Event`], with the date widened to a midnight timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub listing_id: String,
    pub kind: EventKind,
    pub date: NaiveDateTime,
}

impl EventRecord {
    pub fn from_event(event: &Event) -> Self {
        Self {
            listing_id: event.listing_id.clone(),
            kind: event.kind,
            date: midnight_datetime(event.date),
        }
    }
}

pub fn midnight_datetime(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Events of one pairwise comparison: sold listings first, then published
/// ones, all dated at the comparison's current date.
pub fn events_from_comparison(compare: &RecordComparison) -> Vec<Event> {
    let date = compare.current_date;
    let sold = compare.sold.iter().map(|r| Event {
        listing_id: r.id.clone(),
        date,
        kind: EventKind::Sold,
    });
    let published = compare.new.iter().map(|r| Event {
        listing_id: r.id.clone(),
        date,
        kind: EventKind::Published,
    });
    sold.chain(published).collect()
}

/// Walks the snapshots oldest-to-newest and concatenates the events of each
/// consecutive pair. Input order does not matter; the sort is stable, so two
/// snapshots sharing a date stay in input order and still produce a pair
/// diff. Fewer than two snapshots yield no events.
pub fn extract_events(snapshots: &[Snapshot]) -> Vec<Event> {
    let mut ordered: Vec<&Snapshot> = snapshots.iter().collect();
    ordered.sort_by_key(|s| s.date);

    let mut events = Vec::new();
    for pair in ordered.windows(2) {
        let compare = diff_snapshots(pair[1], pair[0]);
        events.extend(events_from_comparison(&compare));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diff::to_counts;
    use crate::tests::utils::{date, snapshot_with_ids};
    use std::collections::HashSet;

    fn event(id: &str, date: NaiveDate, kind: EventKind) -> Event {
        Event {
            listing_id: id.to_string(),
            date,
            kind,
        }
    }

    #[test]
    fn three_snapshots_give_sold_and_published_per_pair() {
        let snapshots = vec![
            snapshot_with_ids(date(2023, 5, 3), &["3", "4"]),
            snapshot_with_ids(date(2023, 5, 1), &["1", "2"]),
            snapshot_with_ids(date(2023, 5, 2), &["2", "3"]),
        ];

        let events = extract_events(&snapshots);

        let expected: HashSet<Event> = [
            event("1", date(2023, 5, 2), EventKind::Sold),
            event("3", date(2023, 5, 2), EventKind::Published),
            event("2", date(2023, 5, 3), EventKind::Sold),
            event("4", date(2023, 5, 3), EventKind::Published),
        ]
        .into_iter()
        .collect();
        assert_eq!(events.len(), 4);
        assert_eq!(events.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn single_snapshot_yields_no_events() {
        let snapshots = vec![snapshot_with_ids(date(2023, 5, 1), &["1", "2"])];
        assert!(extract_events(&snapshots).is_empty());
    }

    #[test]
    fn no_snapshot_yields_no_events() {
        assert!(extract_events(&[]).is_empty());
    }

    #[test]
    fn event_count_matches_pairwise_diff_totals() {
        let snapshots = vec![
            snapshot_with_ids(date(2023, 5, 1), &["1", "2", "3"]),
            snapshot_with_ids(date(2023, 5, 2), &["2", "3", "4", "5"]),
            snapshot_with_ids(date(2023, 5, 3), &["5"]),
        ];

        let events = extract_events(&snapshots);

        let mut expected = 0;
        let mut ordered: Vec<&crate::domain::snapshot::Snapshot> = snapshots.iter().collect();
        ordered.sort_by_key(|s| s.date);
        for pair in ordered.windows(2) {
            let counts = to_counts(&diff_snapshots(pair[1], pair[0]));
            expected += counts.sold + counts.new;
        }
        assert_eq!(events.len(), expected);
    }

    #[test]
    fn identical_consecutive_snapshots_produce_nothing() {
        let snapshots = vec![
            snapshot_with_ids(date(2023, 5, 1), &["1", "2"]),
            snapshot_with_ids(date(2023, 5, 2), &["1", "2"]),
        ];
        assert!(extract_events(&snapshots).is_empty());
    }

    #[test]
    fn record_form_is_dated_at_midnight() {
        let source = event("7", date(2023, 5, 2), EventKind::Published);
        let record = EventRecord::from_event(&source);
        assert_eq!(record.listing_id, "7");
        assert_eq!(record.kind, EventKind::Published);
        assert_eq!(
            record.date,
            date(2023, 5, 2).and_hms_opt(0, 0, 0).unwrap()
        );
    }
}
