// src/domain/snapshot.rs

use chrono::NaiveDate;

use super::history::Dated;
use super::listing::Listing;

/// One dated capture of the full listing inventory. Immutable once built:
/// diffing and analysis only ever produce derived copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub records: Vec<Listing>,
}

impl Snapshot {
    pub fn new(date: NaiveDate, records: Vec<Listing>) -> Self {
        Self { date, records }
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn to_count_snapshot(&self) -> CountSnapshot {
        CountSnapshot {
            date: self.date,
            count: self.count(),
        }
    }
}

impl Dated for Snapshot {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A snapshot reduced to its cardinality, for history reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSnapshot {
    pub date: NaiveDate,
    pub count: usize,
}

impl Dated for CountSnapshot {
    fn date(&self) -> NaiveDate {
        self.date
    }
}
