//! Storage interface for OAC records.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::cursor::CoveredDates;
use crate::errors::Result;
use crate::records::OacRecord;

/// A store keyed by the record's natural key.
///
/// Implementations live in the store crates (PostgREST, SQLite).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upserts one batch in a single request or transaction.
    ///
    /// A record whose key already exists replaces the stored row. Callers
    /// never pass two records with the same key in one batch. Returns the
    /// number of rows sent.
    async fn upsert_batch(&self, records: &[OacRecord]) -> Result<usize>;

    /// Gas days in `[start, end]` with at least one stored row.
    async fn covered_dates(&self, start: NaiveDate, end: NaiveDate) -> Result<CoveredDates>;
}
