//! Reading the durable CSV back.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::constants::{GAS_DATE_COLUMN, GAS_DATE_FORMAT};
use crate::cursor::CoveredDates;
use crate::errors::{ConfigError, Result};
use crate::records::{OacRecord, RecordNormalizer};

/// Collects the gas days present in the durable CSV.
///
/// Never fails: a missing or empty file gives an empty set, and rows with the
/// wrong number of fields or an unparseable `gas_date` are skipped. A read
/// error stops the scan and keeps what was collected so far.
pub fn scan_covered_dates(path: &Path) -> CoveredDates {
    let mut covered = CoveredDates::new();
    if !path.exists() {
        debug!("{} does not exist yet; nothing covered", path.display());
        return covered;
    }

    let mut reader = match csv::ReaderBuilder::new().flexible(true).from_path(path) {
        Ok(reader) => reader,
        Err(e) => {
            warn!("Could not open {}: {}", path.display(), e);
            return covered;
        }
    };
    let (date_idx, width) = match reader.headers() {
        Ok(headers) => match headers.iter().position(|h| h == GAS_DATE_COLUMN) {
            Some(idx) => (idx, headers.len()),
            None => {
                warn!("{} has no {} column", path.display(), GAS_DATE_COLUMN);
                return covered;
            }
        },
        Err(e) => {
            warn!("Could not read header of {}: {}", path.display(), e);
            return covered;
        }
    };

    let mut skipped = 0usize;
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => {
                warn!("Stopped scanning {}: {}", path.display(), e);
                break;
            }
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if row.len() != width {
            skipped += 1;
            continue;
        }
        match row
            .get(date_idx)
            .and_then(|cell| NaiveDate::parse_from_str(cell.trim(), GAS_DATE_FORMAT).ok())
        {
            Some(date) => {
                covered.insert(date);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Ignored {} malformed rows in {}", skipped, path.display());
    }
    covered
}

/// Records re-read from the durable CSV.
#[derive(Debug, Default)]
pub struct CsvRecords {
    pub records: Vec<OacRecord>,
    /// Rows dropped for a missing or invalid `gas_date`.
    pub skipped: usize,
}

/// Reads and normalizes every row of the durable CSV.
///
/// The file must exist. Rows are keyed by header, so columns may appear in
/// any order and under either their source label or column name.
pub fn read_records(path: &Path, normalizer: &RecordNormalizer) -> Result<CsvRecords> {
    if !path.exists() {
        return Err(ConfigError::MissingInput(path.display().to_string()).into());
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut out = CsvRecords::default();
    for row in reader.records() {
        let row = row?;
        let cells: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(row.iter().map(String::from))
            .collect();
        match normalizer.normalize_csv_row(&cells) {
            Ok(record) => out.records.push(record),
            Err(e) => {
                debug!("Skipping row {:?}: {}", row.position().map(|p| p.line()), e);
                out.skipped += 1;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{csv_header, Quantity};
    use tempfile::tempdir;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn write(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("flows.csv");
        std::fs::write(&path, body).unwrap();
        path
    }

    fn full_row(date: &str) -> String {
        format!("{},06/01/2025,09:00,1,A,B,Receipt,R,MMBtu,Y,1,2,3,4,5", date)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        assert!(scan_covered_dates(&dir.path().join("absent.csv")).is_empty());
    }

    #[test]
    fn test_empty_file_is_empty() {
        let dir = tempdir().unwrap();
        assert!(scan_covered_dates(&write(&dir, "")).is_empty());
    }

    #[test]
    fn test_collects_distinct_dates() {
        let dir = tempdir().unwrap();
        let body = format!(
            "{}\n{}\n{}\n{}\n",
            csv_header().join(","),
            full_row("2025-06-01"),
            full_row("2025-06-01"),
            full_row("2025-06-03")
        );

        let covered = scan_covered_dates(&write(&dir, &body));

        assert_eq!(covered.iter().copied().collect::<Vec<_>>(), vec![d(1), d(3)]);
    }

    #[test]
    fn test_truncated_and_garbage_rows_are_ignored() {
        let dir = tempdir().unwrap();
        let body = format!(
            "{}\n{}\nnot-a-date,,,,,,,,,,,,,,\n2025-06-05,06/05/2025,09",
            csv_header().join(","),
            full_row("2025-06-02"),
        );

        let covered = scan_covered_dates(&write(&dir, &body));

        assert_eq!(covered.len(), 1);
        assert_eq!(covered.latest(), Some(d(2)));
    }

    #[test]
    fn test_read_records_normalizes_rows() {
        let dir = tempdir().unwrap();
        let body = format!(
            "{}\n{}\n,no,date\n",
            csv_header().join(","),
            full_row("2025-06-02")
        );

        let read = read_records(&write(&dir, &body), &RecordNormalizer::new()).unwrap();

        assert_eq!(read.records.len(), 1);
        assert_eq!(read.skipped, 1);
        assert_eq!(read.records[0].gas_date, d(2));
        assert_eq!(read.records[0].oac, Some(Quantity::Int(5)));
        assert_eq!(read.records[0].meas_basis_desc.as_deref(), Some("MMBtu"));
    }

    #[test]
    fn test_read_records_requires_file() {
        let dir = tempdir().unwrap();
        let err = read_records(&dir.path().join("absent.csv"), &RecordNormalizer::new());
        assert!(matches!(
            err,
            Err(crate::errors::Error::Config(ConfigError::MissingInput(_)))
        ));
    }
}
