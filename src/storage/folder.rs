// src/storage/folder.rs
//
// Local snapshot store: one HTML file per capture, named with a fixed
// prefix and the capture date. The date in the name is authoritative; the
// records of a loaded snapshot carry midnight of that date as `loaded_at`.

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::events::midnight_datetime;
use crate::domain::snapshot::Snapshot;
use crate::scraper::parse_snapshot_html;

use super::storage_error::StorageError;

pub const SNAPSHOT_FILE_PREFIX: &str = "nexity_";
pub const SNAPSHOT_FILE_EXT: &str = "html";
const SNAPSHOT_DATE_FORMAT: &str = "%Y_%m_%d";

/// `nexity_2020_12_25.html` for 2020-12-25.
pub fn snapshot_file_name(date: NaiveDate) -> String {
    format!(
        "{SNAPSHOT_FILE_PREFIX}{}.{SNAPSHOT_FILE_EXT}",
        date.format(SNAPSHOT_DATE_FORMAT)
    )
}

/// Recovers the capture date from a snapshot file name.
pub fn extract_date_from_file_name(name: &str) -> Result<NaiveDate, StorageError> {
    let stem = name
        .strip_prefix(SNAPSHOT_FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(&format!(".{SNAPSHOT_FILE_EXT}")))
        .ok_or_else(|| StorageError::BadFileName(name.to_string()))?;

    NaiveDate::parse_from_str(stem, SNAPSHOT_DATE_FORMAT)
        .map_err(|_| StorageError::BadFileName(name.to_string()))
}

/// Every dated snapshot file of the folder, unordered. Files without the
/// prefix are ignored; prefixed files with an unparsable date are skipped
/// with a warning rather than failing the whole run.
pub fn list_snapshot_files(folder: &Path) -> Result<Vec<(PathBuf, NaiveDate)>, StorageError> {
    let entries = fs::read_dir(folder).map_err(|e| io_error(folder, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_error(folder, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if !name.starts_with(SNAPSHOT_FILE_PREFIX) {
            continue;
        }
        match extract_date_from_file_name(&name) {
            Ok(date) => files.push((path, date)),
            Err(_) => eprintln!("⚠️ skipping {name}: unrecognized snapshot file name"),
        }
    }
    Ok(files)
}

/// Loads every snapshot of the folder. The core does not care where the
/// folder content came from; this is the whole source-loader interface.
pub fn load_snapshots_from_folder(folder: &Path) -> Result<Vec<Snapshot>, StorageError> {
    let mut snapshots = Vec::new();
    for (path, date) in list_snapshot_files(folder)? {
        let html = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        let records = parse_snapshot_html(&html, midnight_datetime(date)).map_err(|e| {
            StorageError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        snapshots.push(Snapshot::new(date, records));
    }
    Ok(snapshots)
}

fn io_error(path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::date;

    #[test]
    fn file_name_carries_the_capture_date() {
        assert_eq!(snapshot_file_name(date(2020, 12, 25)), "nexity_2020_12_25.html");
    }

    #[test]
    fn date_round_trips_through_the_file_name() {
        let day = date(2021, 3, 7);
        let name = snapshot_file_name(day);
        assert_eq!(extract_date_from_file_name(&name).unwrap(), day);
    }

    #[test]
    fn foreign_file_names_are_rejected() {
        assert!(extract_date_from_file_name("notes.txt").is_err());
        assert!(extract_date_from_file_name("nexity_2020-12-25.html").is_err());
        assert!(extract_date_from_file_name("nexity_2020_12_25.json").is_err());
        assert!(extract_date_from_file_name("nexity_.html").is_err());
    }
}
