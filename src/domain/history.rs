// src/domain/history.rs
//
// Bounded three-point timeline over any dated items. Instead of keeping a
// full time series we retain the designated current item, the nearest
// strictly-older item and the oldest item seen.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt;

/// Anything carrying a capture date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// The reduced 3-point timeline. `previous` is `None` until a second point
/// in time exists; `original` falls back to `current` for an empty pool.
///
/// Invariant: `original.date <= previous.date < current.date` whenever
/// `previous` is present.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortHistory<T> {
    pub current: T,
    pub previous: Option<T>,
    pub original: T,
}

/// Picking the newest of an empty candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyPoolError;

impl fmt::Display for EmptyPoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at least one dated item is required")
    }
}

impl Error for EmptyPoolError {}

pub fn is_strictly_between(dt: NaiveDate, previous: NaiveDate, next: NaiveDate) -> bool {
    previous < dt && dt < next
}

/// Builds the short history for `current` from an unordered candidate pool.
///
/// Single pass. Comparisons are strict, so pool items sharing a date with a
/// kept candidate never replace it: on ties the earliest-encountered wins.
/// Items dated `current.date` or later are ignored for `previous`.
pub fn select_history<T: Dated + Clone>(current: &T, pool: &[T]) -> ShortHistory<T> {
    let mut original = current;
    let mut previous: Option<&T> = None;

    for item in pool {
        if item.date() < original.date() {
            original = item;
        }
        previous = match previous {
            None if item.date() < current.date() => Some(item),
            Some(kept) if is_strictly_between(item.date(), kept.date(), current.date()) => {
                Some(item)
            }
            kept => kept,
        };
    }

    ShortHistory {
        current: current.clone(),
        previous: previous.cloned(),
        original: original.clone(),
    }
}

/// The maximal-date item of the pool. Strict comparison: of several items
/// sharing the maximal date, the first one seen is returned.
pub fn extract_newest<T: Dated>(pool: &[T]) -> Result<&T, EmptyPoolError> {
    let mut newest: Option<&T> = None;
    for item in pool {
        match newest {
            Some(kept) if item.date() <= kept.date() => {}
            _ => newest = Some(item),
        }
    }
    newest.ok_or(EmptyPoolError)
}

/// Variant of [`select_history`] that designates the newest pool item as
/// `current`. Fails on an empty pool.
pub fn select_history_newest_as_current<T: Dated + Clone>(
    pool: &[T],
) -> Result<ShortHistory<T>, EmptyPoolError> {
    let newest = extract_newest(pool)?;
    Ok(select_history(newest, pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Stamp {
        date: NaiveDate,
        tag: u32,
    }

    impl Dated for Stamp {
        fn date(&self) -> NaiveDate {
            self.date
        }
    }

    fn stamp(y: i32, m: u32, d: u32) -> Stamp {
        tagged(y, m, d, 0)
    }

    fn tagged(y: i32, m: u32, d: u32, tag: u32) -> Stamp {
        Stamp {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            tag,
        }
    }

    #[test]
    fn strictly_between_rejects_both_bounds() {
        let low = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let mid = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        let high = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(is_strictly_between(mid, low, high));
        assert!(!is_strictly_between(low, low, high));
        assert!(!is_strictly_between(high, low, high));
        assert!(!is_strictly_between(mid, mid, mid));
    }

    #[test]
    fn selects_nearest_previous_and_oldest_original() {
        let current = stamp(2020, 12, 25);
        let pool = vec![
            stamp(2019, 11, 23),
            stamp(2018, 12, 24),
            stamp(2020, 12, 24),
            stamp(2019, 12, 23),
        ];

        let history = select_history(&current, &pool);

        assert_eq!(history.current, current);
        assert_eq!(history.previous, Some(stamp(2020, 12, 24)));
        assert_eq!(history.original, stamp(2018, 12, 24));
    }

    #[test]
    fn empty_pool_gives_no_previous_and_current_as_original() {
        let current = stamp(2020, 12, 25);
        let history = select_history(&current, &[]);
        assert_eq!(history.previous, None);
        assert_eq!(history.original, current);
    }

    #[test]
    fn pool_items_dated_like_current_are_not_previous() {
        let current = stamp(2020, 12, 25);
        let pool = vec![stamp(2020, 12, 25), stamp(2021, 1, 1)];
        let history = select_history(&current, &pool);
        assert_eq!(history.previous, None);
        // An item dated like current never replaces original either.
        assert_eq!(history.original, current);
    }

    #[test]
    fn equal_dates_keep_the_first_seen_candidate() {
        let current = stamp(2020, 12, 25);
        let pool = vec![
            tagged(2020, 12, 24, 1),
            tagged(2020, 12, 24, 2),
            tagged(2018, 1, 1, 3),
            tagged(2018, 1, 1, 4),
        ];

        let history = select_history(&current, &pool);

        assert_eq!(history.previous.unwrap().tag, 1);
        assert_eq!(history.original.tag, 3);
    }

    #[test]
    fn history_is_monotonic() {
        let current = stamp(2021, 6, 1);
        let pool = vec![
            stamp(2021, 5, 30),
            stamp(2019, 2, 2),
            stamp(2021, 7, 1),
            stamp(2020, 8, 15),
        ];

        let history = select_history(&current, &pool);

        let previous = history.previous.expect("previous should exist");
        assert!(history.original.date() <= previous.date());
        assert!(previous.date() < history.current.date());
    }

    #[test]
    fn extract_newest_picks_max_and_first_seen_on_ties() {
        let pool = vec![
            tagged(2020, 1, 1, 1),
            tagged(2021, 3, 3, 2),
            tagged(2021, 3, 3, 3),
        ];
        let newest = extract_newest(&pool).unwrap();
        assert_eq!(newest.tag, 2);
    }

    #[test]
    fn extract_newest_fails_on_empty_pool() {
        let pool: Vec<Stamp> = Vec::new();
        assert_eq!(extract_newest(&pool), Err(EmptyPoolError));
    }

    #[test]
    fn newest_as_current_builds_full_history() {
        let pool = vec![stamp(2020, 1, 1), stamp(2020, 3, 1), stamp(2020, 2, 1)];
        let history = select_history_newest_as_current(&pool).unwrap();
        assert_eq!(history.current, stamp(2020, 3, 1));
        assert_eq!(history.previous, Some(stamp(2020, 2, 1)));
        assert_eq!(history.original, stamp(2020, 1, 1));
    }

    #[test]
    fn newest_as_current_fails_on_empty_pool() {
        let pool: Vec<Stamp> = Vec::new();
        assert!(select_history_newest_as_current(&pool).is_err());
    }
}
