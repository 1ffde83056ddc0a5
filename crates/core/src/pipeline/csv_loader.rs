//! One-shot load of the durable CSV into a store.

use std::path::Path;

use log::{info, warn};

use super::pipeline_model::LoadReport;
use crate::errors::Result;
use crate::output::read_records;
use crate::records::{dedupe_by_key, RecordNormalizer};
use crate::store::{percent, StoreUpsertClient};

pub struct CsvLoader {
    upserter: StoreUpsertClient,
    normalizer: RecordNormalizer,
}

impl CsvLoader {
    pub fn new(upserter: StoreUpsertClient) -> Self {
        Self {
            upserter,
            normalizer: RecordNormalizer::new(),
        }
    }

    /// Normalizes every row of `path` and upserts the result.
    ///
    /// Fails only when the file is missing or unreadable; rejected batches are
    /// counted in the report.
    pub async fn load(&self, path: &Path) -> Result<LoadReport> {
        let read = read_records(path, &self.normalizer)?;
        let rows_read = read.records.len() + read.skipped;
        if read.skipped > 0 {
            warn!("Skipped {} rows without a valid gas_date", read.skipped);
        }

        let records = dedupe_by_key(read.records);
        info!(
            "Loading {} records from {} ({} rows read)",
            records.len(),
            path.display(),
            rows_read
        );

        let unique_records = records.len();
        let upserted = self.upserter.upsert_all(records).await;
        info!(
            "Done: {} written, {} failed ({:.1}% written)",
            upserted.written,
            upserted.failed,
            percent(upserted.written, unique_records)
        );

        Ok(LoadReport {
            rows_read,
            rows_skipped: read.skipped,
            unique_records,
            written: upserted.written,
            failed: upserted.failed,
            failed_batches: upserted.failed_batches,
        })
    }
}
