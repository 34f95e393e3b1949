use chrono::NaiveTime;
use std::fs;

use crate::storage::load_snapshots_from_folder;
use crate::tests::utils::{date, lot_json, snapshot_html, test_dir};

#[test]
fn folder_load_parses_every_dated_snapshot() {
    let dir = test_dir("folder-load");
    fs::write(
        dir.join("nexity_2023_05_01.html"),
        snapshot_html(&format!(
            "[{},{}]",
            lot_json("1", 100_000.0),
            lot_json("2", 200_000.0)
        )),
    )
    .unwrap();
    fs::write(
        dir.join("nexity_2023_05_02.html"),
        snapshot_html(&format!("[{}]", lot_json("2", 200_000.0))),
    )
    .unwrap();
    fs::write(dir.join("notes.txt"), "not a snapshot").unwrap();

    let mut snapshots = load_snapshots_from_folder(&dir).unwrap();
    snapshots.sort_by_key(|s| s.date);

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].date, date(2023, 5, 1));
    assert_eq!(snapshots[0].count(), 2);
    assert_eq!(snapshots[1].date, date(2023, 5, 2));
    assert_eq!(snapshots[1].records[0].id, "2");
    // loaded_at is midnight of the file-name date.
    assert_eq!(
        snapshots[1].records[0].loaded_at,
        date(2023, 5, 2).and_time(NaiveTime::MIN)
    );
}

#[test]
fn unreadable_snapshot_content_fails_with_the_path() {
    let dir = test_dir("folder-bad-content");
    fs::write(dir.join("nexity_2023_05_01.html"), "<html>no state</html>").unwrap();

    let err = load_snapshots_from_folder(&dir).unwrap_err();
    assert!(err.to_string().contains("nexity_2023_05_01.html"));
}

#[test]
fn empty_folder_loads_no_snapshots() {
    let dir = test_dir("folder-empty");
    assert!(load_snapshots_from_folder(&dir).unwrap().is_empty());
}
