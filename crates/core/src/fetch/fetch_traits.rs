use async_trait::async_trait;
use chrono::NaiveDate;

use super::fetch_model::DayOutcome;

/// Source of one gas day's normalized postings.
///
/// Implementations absorb their own errors: a day that cannot be fetched is
/// reported as [`DayOutcome::Failed`], never as an `Err`.
#[async_trait]
pub trait DayFetcher: Send + Sync {
    async fn fetch_day(&self, date: NaiveDate) -> DayOutcome;
}
