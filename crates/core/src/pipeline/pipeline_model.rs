use chrono::NaiveDate;

use crate::store::BatchFailure;

/// Outcome of a backfill run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillReport {
    /// Dates in the requested range.
    pub dates_requested: usize,
    /// Dates skipped because they were already covered.
    pub dates_skipped: usize,
    pub dates_attempted: usize,
    pub dates_with_data: usize,
    pub rows_written: usize,
    pub no_data_dates: Vec<NaiveDate>,
    /// Dates that failed to fetch or to write. Absent from the output.
    pub failed_dates: Vec<NaiveDate>,
}

impl BackfillReport {
    pub fn is_complete(&self) -> bool {
        self.failed_dates.is_empty()
    }
}

/// Outcome of an incremental update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Dates refreshed, oldest first.
    pub window: Vec<NaiveDate>,
    pub dates_with_data: usize,
    pub rows_written: usize,
    pub rows_failed: usize,
    pub no_data_dates: Vec<NaiveDate>,
    pub failed_dates: Vec<NaiveDate>,
}

impl UpdateReport {
    pub fn is_complete(&self) -> bool {
        self.failed_dates.is_empty() && self.rows_failed == 0
    }
}

/// Outcome of loading the durable CSV into a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    /// Rows dropped for a missing or invalid `gas_date`.
    pub rows_skipped: usize,
    /// Records left after collapsing duplicate keys.
    pub unique_records: usize,
    pub written: usize,
    pub failed: usize,
    pub failed_batches: Vec<BatchFailure>,
}
