// src/domain/analysis.rs

use std::error::Error;
use std::fmt;

use super::diff::{diff_snapshots, has_evolved, to_counts, CountComparison, RecordComparison};
use super::history::ShortHistory;
use super::snapshot::{CountSnapshot, Snapshot};

/// Aggregated view of the latest change window: the 3-point count history
/// plus the newest pairwise comparison in record and count form.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalAnalysis {
    pub count_history: ShortHistory<CountSnapshot>,
    pub latest_compare: RecordComparison,
    pub latest_counts: CountComparison,
}

impl GlobalAnalysis {
    /// True iff the latest comparison saw any sold or published listing.
    pub fn has_changed(&self) -> bool {
        has_evolved(&self.latest_counts)
    }
}

/// Building an analysis from a history with a single time point. Expected on
/// the first run; callers skip notification rather than fail the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingPreviousError;

impl fmt::Display for MissingPreviousError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a global analysis needs at least two snapshots to compare")
    }
}

impl Error for MissingPreviousError {}

/// Assembles the [`GlobalAnalysis`] of a snapshot history: diff of
/// (current, previous) plus the history reduced to counts.
pub fn build_analysis(
    history: &ShortHistory<Snapshot>,
) -> Result<GlobalAnalysis, MissingPreviousError> {
    let previous = history.previous.as_ref().ok_or(MissingPreviousError)?;

    let latest_compare = diff_snapshots(&history.current, previous);
    let latest_counts = to_counts(&latest_compare);
    let count_history = ShortHistory {
        current: history.current.to_count_snapshot(),
        previous: history.previous.as_ref().map(Snapshot::to_count_snapshot),
        original: history.original.to_count_snapshot(),
    };

    Ok(GlobalAnalysis {
        count_history,
        latest_compare,
        latest_counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::{date, snapshot_with_ids};

    #[test]
    fn analysis_requires_a_previous_snapshot() {
        let current = snapshot_with_ids(date(2023, 5, 2), &["1"]);
        let history = ShortHistory {
            current: current.clone(),
            previous: None,
            original: current,
        };
        assert_eq!(build_analysis(&history), Err(MissingPreviousError));
    }

    #[test]
    fn analysis_aggregates_counts_and_latest_compare() {
        let original = snapshot_with_ids(date(2023, 4, 1), &["1", "2", "3", "4"]);
        let previous = snapshot_with_ids(date(2023, 5, 1), &["1", "2", "3"]);
        let current = snapshot_with_ids(date(2023, 5, 2), &["2", "3", "4"]);
        let history = ShortHistory {
            current,
            previous: Some(previous),
            original,
        };

        let analysis = build_analysis(&history).unwrap();

        assert_eq!(analysis.count_history.original.count, 4);
        assert_eq!(analysis.count_history.previous.unwrap().count, 3);
        assert_eq!(analysis.count_history.current.count, 3);
        assert_eq!(analysis.latest_counts.sold, 1);
        assert_eq!(analysis.latest_counts.new, 1);
        assert_eq!(analysis.latest_compare.sold[0].id, "1");
        assert_eq!(analysis.latest_compare.new[0].id, "4");
        assert!(analysis.has_changed());
    }

    #[test]
    fn identical_id_sets_do_not_count_as_change() {
        let previous = snapshot_with_ids(date(2023, 5, 1), &["1", "2"]);
        let current = snapshot_with_ids(date(2023, 5, 2), &["1", "2"]);
        let history = ShortHistory {
            current,
            previous: Some(previous.clone()),
            original: previous,
        };

        let analysis = build_analysis(&history).unwrap();

        assert!(!analysis.has_changed());
    }
}
