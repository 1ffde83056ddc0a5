//! Resumable backfill over a date range.
//!
//! ```text
//! [start ..= end] ─► FetchCursor (skip covered) ─► DayFetcher ─► RecordSink
//!                                                      │
//!                                                      └─► GapLedger (failed dates)
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use log::{error, info, warn};

use super::pipeline_model::BackfillReport;
use crate::config::PipelineConfig;
use crate::cursor::FetchCursor;
use crate::fetch::{DayFetcher, DayOutcome};
use crate::ledger::{GapLedger, GapStage};
use crate::output::RecordSink;
use crate::utils::get_days_between;

pub struct BackfillRunner {
    fetcher: Arc<dyn DayFetcher>,
    polite_delay: Duration,
}

impl BackfillRunner {
    pub fn new(fetcher: Arc<dyn DayFetcher>, config: &PipelineConfig) -> Self {
        Self {
            fetcher,
            polite_delay: config.polite_delay,
        }
    }

    /// Fetches every date in `[start, end]` not yet covered and appends it to `sink`.
    ///
    /// `cursor` is consulted once, before the first fetch. Per-date failures
    /// are logged, recorded in `ledger` and reported; they never stop the run.
    pub async fn run(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        cursor: &dyn FetchCursor,
        sink: &mut dyn RecordSink,
        ledger: &mut GapLedger,
    ) -> BackfillReport {
        let all_dates = get_days_between(start, end);
        let pending = cursor.pending(&all_dates);

        let mut report = BackfillReport {
            dates_requested: all_dates.len(),
            dates_skipped: all_dates.len() - pending.len(),
            ..BackfillReport::default()
        };
        info!(
            "Backfill {}..{}: {} dates, {} already covered, {} to fetch",
            start,
            end,
            report.dates_requested,
            report.dates_skipped,
            pending.len()
        );

        let total = pending.len();
        for (idx, date) in pending.into_iter().enumerate() {
            if idx > 0 && !self.polite_delay.is_zero() {
                tokio::time::sleep(self.polite_delay).await;
            }
            report.dates_attempted += 1;
            let progress = format!("[{}/{}] {}", idx + 1, total, date);

            match self.fetcher.fetch_day(date).await {
                DayOutcome::Records(records) => match sink.write_day(date, &records).await {
                    Ok(written) => {
                        info!("{} {} records", progress, written);
                        report.dates_with_data += 1;
                        report.rows_written += written;
                    }
                    Err(e) => {
                        error!("{} FAILED to write: {}", progress, e);
                        ledger.record(date, GapStage::Write, e.to_string());
                        report.failed_dates.push(date);
                    }
                },
                DayOutcome::NoData => {
                    info!("{} no data", progress);
                    report.no_data_dates.push(date);
                }
                DayOutcome::Failed { reason } => {
                    warn!("{} FAILED: {}", progress, reason);
                    ledger.record(date, GapStage::Fetch, reason);
                    report.failed_dates.push(date);
                }
            }
        }

        info!(
            "Backfill done: {} rows over {} dates, {} without data, {} failed",
            report.rows_written,
            report.dates_with_data,
            report.no_data_dates.len(),
            report.failed_dates.len()
        );
        report
    }
}
