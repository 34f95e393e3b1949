use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::fmt;
use std::path::Path;

use crate::domain::stats::ListingStats;

#[derive(Debug)]
pub enum XlsxExportError {
    Write(String),
    Save(String),
}

impl fmt::Display for XlsxExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XlsxExportError::Write(msg) => write!(f, "Failed to write workbook cell: {msg}"),
            XlsxExportError::Save(msg) => write!(f, "Failed to save workbook: {msg}"),
        }
    }
}

impl Error for XlsxExportError {}

/// Writes the per-listing aggregation table to an XLSX workbook, one row
/// per listing id.
pub fn export_stats_xlsx(stats: &[ListingStats], path: &Path) -> Result<(), XlsxExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let headers = [
        "Lot",
        "Type",
        "Pièces",
        "Surface",
        "Étage",
        "Orientation",
        "Première vue",
        "Dernière vue",
        "Nb captures",
        "Prix initial",
        "Prix final",
        "Versions de prix",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| XlsxExportError::Write(format!("header '{header}': {e}")))?;
    }

    for (i, entry) in stats.iter().enumerate() {
        let r = (i + 1) as u32;
        let write_err = |e: rust_xlsxwriter::XlsxError| {
            XlsxExportError::Write(format!("row for lot {}: {}", entry.id, e))
        };

        worksheet.write_string(r, 0, &entry.id).map_err(write_err)?;
        worksheet
            .write_string(r, 1, entry.category.as_str())
            .map_err(write_err)?;
        worksheet
            .write_string(r, 2, &entry.room_label)
            .map_err(write_err)?;
        worksheet
            .write_number(r, 3, entry.size_m2 as f64)
            .map_err(write_err)?;
        worksheet
            .write_number(r, 4, entry.floor as f64)
            .map_err(write_err)?;
        worksheet
            .write_string(r, 5, entry.orientation.as_str())
            .map_err(write_err)?;
        worksheet
            .write_string(r, 6, &entry.first_seen.format("%Y/%m/%d").to_string())
            .map_err(write_err)?;
        worksheet
            .write_string(r, 7, &entry.last_seen.format("%Y/%m/%d").to_string())
            .map_err(write_err)?;
        worksheet
            .write_number(r, 8, entry.times_seen as f64)
            .map_err(write_err)?;
        worksheet
            .write_number(r, 9, entry.price_start)
            .map_err(write_err)?;
        worksheet
            .write_number(r, 10, entry.price_end)
            .map_err(write_err)?;
        worksheet
            .write_number(r, 11, entry.price_versions as f64)
            .map_err(write_err)?;
    }

    workbook
        .save(path)
        .map_err(|e| XlsxExportError::Save(e.to_string()))?;

    Ok(())
}
