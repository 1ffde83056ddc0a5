use async_trait::async_trait;
use chrono::NaiveDate;

use super::output_traits::RecordSink;
use crate::errors::{Result, StoreError};
use crate::records::OacRecord;
use crate::store::StoreUpsertClient;

/// Writes each day straight to a store instead of the durable CSV.
pub struct StoreSink {
    client: StoreUpsertClient,
}

impl StoreSink {
    pub fn new(client: StoreUpsertClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordSink for StoreSink {
    async fn write_day(&mut self, _gas_date: NaiveDate, records: &[OacRecord]) -> Result<usize> {
        let report = self.client.upsert_all(records.to_vec()).await;
        if report.is_complete() {
            Ok(report.written)
        } else {
            Err(StoreError::PartialWrite {
                written: report.written,
                failed: report.failed,
            }
            .into())
        }
    }
}
