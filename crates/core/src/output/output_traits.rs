use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::records::OacRecord;

/// Append-only destination for one gas day's records at a time.
#[async_trait]
pub trait RecordSink: Send {
    /// Durably writes `records` for `gas_date`. Returns the rows written.
    async fn write_day(&mut self, gas_date: NaiveDate, records: &[OacRecord]) -> Result<usize>;
}
