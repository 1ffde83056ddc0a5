//! Batched idempotent writes.

use std::sync::Arc;

use log::{error, info};

use super::store_traits::RecordStore;
use crate::constants::DEFAULT_BATCH_SIZE;
use crate::records::{dedupe_by_key, OacRecord};

/// A batch the store rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// 1-based position of the batch within the call.
    pub index: usize,
    pub rows: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsertReport {
    pub written: usize,
    pub failed: usize,
    pub failed_batches: Vec<BatchFailure>,
}

impl UpsertReport {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    /// Adds the counts of `other` to this report.
    pub fn absorb(&mut self, other: UpsertReport) {
        self.written += other.written;
        self.failed += other.failed;
        self.failed_batches.extend(other.failed_batches);
    }
}

/// Splits record sets into batches and upserts them one by one.
///
/// A rejected batch is logged and counted; later batches are still sent.
#[derive(Clone)]
pub struct StoreUpsertClient {
    store: Arc<dyn RecordStore>,
    batch_size: usize,
}

impl StoreUpsertClient {
    pub fn new(store: Arc<dyn RecordStore>, batch_size: usize) -> Self {
        Self {
            store,
            batch_size: if batch_size == 0 {
                DEFAULT_BATCH_SIZE
            } else {
                batch_size
            },
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Upserts `records`, collapsing duplicate keys first (last one wins).
    pub async fn upsert_all(&self, records: Vec<OacRecord>) -> UpsertReport {
        let mut report = UpsertReport::default();
        let records = dedupe_by_key(records);
        if records.is_empty() {
            return report;
        }

        let total = records.len();
        let batches = total.div_ceil(self.batch_size);
        for (idx, chunk) in records.chunks(self.batch_size).enumerate() {
            let batch_no = idx + 1;
            match self.store.upsert_batch(chunk).await {
                Ok(_) => {
                    report.written += chunk.len();
                    info!(
                        "Batch {}/{}: {} rows ({}/{} = {:.1}%)",
                        batch_no,
                        batches,
                        chunk.len(),
                        report.written + report.failed,
                        total,
                        percent(report.written + report.failed, total)
                    );
                }
                Err(e) => {
                    error!("Batch {} failed: {}", batch_no, e);
                    report.failed += chunk.len();
                    report.failed_batches.push(BatchFailure {
                        index: batch_no,
                        rows: chunk.len(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

pub(crate) fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        done as f64 * 100.0 / total as f64
    }
}
