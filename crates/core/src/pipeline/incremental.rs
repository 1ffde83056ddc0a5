//! Daily refresh of the trailing window.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use log::{info, warn};

use super::pipeline_model::UpdateReport;
use crate::config::PipelineConfig;
use crate::fetch::{DayFetcher, DayOutcome};
use crate::ledger::{GapLedger, GapStage};
use crate::store::StoreUpsertClient;
use crate::utils::trailing_window;

/// Re-fetches the most recent gas days and upserts them.
///
/// Every date in the window is fetched whatever the store already holds,
/// since recent postings are revised in place.
pub struct IncrementalUpdater {
    fetcher: Arc<dyn DayFetcher>,
    upserter: StoreUpsertClient,
    polite_delay: Duration,
    lookback_days: u32,
}

impl IncrementalUpdater {
    pub fn new(
        fetcher: Arc<dyn DayFetcher>,
        upserter: StoreUpsertClient,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            fetcher,
            upserter,
            polite_delay: config.polite_delay,
            lookback_days: config.effective_lookback(),
        }
    }

    /// Dates refreshed for `today`, oldest first.
    pub fn window(&self, today: NaiveDate) -> Vec<NaiveDate> {
        trailing_window(today, self.lookback_days)
    }

    pub async fn run(&self, today: NaiveDate, ledger: &mut GapLedger) -> UpdateReport {
        let window = self.window(today);
        let mut report = UpdateReport {
            window: window.clone(),
            ..UpdateReport::default()
        };

        for (idx, date) in window.into_iter().enumerate() {
            if idx > 0 && !self.polite_delay.is_zero() {
                tokio::time::sleep(self.polite_delay).await;
            }

            match self.fetcher.fetch_day(date).await {
                DayOutcome::Records(records) => {
                    let upserted = self.upserter.upsert_all(records).await;
                    info!("{}: {} rows", date, upserted.written);
                    report.dates_with_data += 1;
                    report.rows_written += upserted.written;
                    report.rows_failed += upserted.failed;
                    if !upserted.is_complete() {
                        ledger.record(
                            date,
                            GapStage::Write,
                            format!("{} rows rejected by the store", upserted.failed),
                        );
                        report.failed_dates.push(date);
                    }
                }
                DayOutcome::NoData => {
                    info!("{}: no data", date);
                    report.no_data_dates.push(date);
                }
                DayOutcome::Failed { reason } => {
                    warn!("{}: FAILED: {}", date, reason);
                    ledger.record(date, GapStage::Fetch, reason);
                    report.failed_dates.push(date);
                }
            }
        }
        report
    }
}
