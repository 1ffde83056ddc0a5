//! Record of gas days that could not be fetched or written.
//!
//! A failed date is simply absent from the output, so a resumed backfill
//! retries it. The ledger makes those gaps visible after the run ends.

use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapStage {
    Fetch,
    Write,
}

impl fmt::Display for GapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapStage::Fetch => f.write_str("fetch"),
            GapStage::Write => f.write_str("write"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapEntry {
    pub gas_date: NaiveDate,
    pub stage: GapStage,
    pub reason: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct GapLedger {
    entries: Vec<GapEntry>,
    path: Option<PathBuf>,
}

impl GapLedger {
    /// A ledger kept in memory only.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A ledger that also appends every entry to the CSV file at `path`.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: Vec::new(),
            path: Some(path.into()),
        }
    }

    pub fn record(&mut self, gas_date: NaiveDate, stage: GapStage, reason: impl Into<String>) {
        let entry = GapEntry {
            gas_date,
            stage,
            reason: reason.into(),
            recorded_at: Utc::now(),
        };
        if let Some(path) = &self.path {
            // Ledger file errors are logged only.
            if let Err(e) = append_entry(path, &entry) {
                warn!("Could not append to gap ledger {}: {}", path.display(), e);
            }
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[GapEntry] {
        &self.entries
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.entries.iter().map(|entry| entry.gas_date).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reads every entry previously appended to the ledger file at `path`.
    pub fn load(path: &Path) -> Result<Vec<GapEntry>> {
        if !path.exists() {
            return Err(ConfigError::MissingInput(path.display().to_string()).into());
        }
        let mut reader = csv::Reader::from_path(path)?;
        let mut entries = Vec::new();
        for entry in reader.deserialize::<GapEntry>() {
            entries.push(entry?);
        }
        Ok(entries)
    }
}

fn append_entry(path: &Path, entry: &GapEntry) -> Result<()> {
    let is_new = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(is_new)
        .from_writer(file);
    writer.serialize(entry)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_in_memory_ledger() {
        let mut ledger = GapLedger::in_memory();
        ledger.record(d(8), GapStage::Fetch, "Gave up after 4 attempts");
        ledger.record(d(9), GapStage::Write, "disk full");

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.dates(), vec![d(8), d(9)]);
        assert_eq!(ledger.entries()[1].stage, GapStage::Write);
    }

    #[test]
    fn test_file_ledger_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gaps.csv");

        let mut first = GapLedger::with_file(&path);
        first.record(d(8), GapStage::Fetch, "timeout, then reset");
        let mut second = GapLedger::with_file(&path);
        second.record(d(9), GapStage::Write, "rejected");

        let entries = GapLedger::load(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].gas_date, d(8));
        assert_eq!(entries[0].reason, "timeout, then reset");
        assert_eq!(entries[1].stage, GapStage::Write);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("gas_date,stage,reason,recorded_at\n"));
        assert_eq!(text.matches("gas_date").count(), 1);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = tempdir().unwrap();
        assert!(GapLedger::load(&dir.path().join("absent.csv")).is_err());
    }
}
