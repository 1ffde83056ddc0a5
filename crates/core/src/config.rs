//! Pipeline settings.
//!
//! [`PipelineConfig`] is built once by the caller and handed to every
//! component; nothing in this crate reads the environment.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use oac_infopost::InfopostConfig;

use crate::constants::*;
use crate::errors::{ConfigError, Result};

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Endpoint, selectors, timeouts and retry policy of the source.
    pub source: InfopostConfig,
    /// Pause between consecutive date fetches.
    pub polite_delay: Duration,
    /// Maximum rows per upsert request.
    pub batch_size: usize,
    /// Number of dates the incremental update refreshes, today included.
    pub lookback_days: u32,
    pub table_name: String,
    pub backfill_start: NaiveDate,
    /// Durable CSV the backfill appends to.
    pub output_path: PathBuf,
    /// Where failed dates are recorded. `None` keeps the ledger in memory.
    pub ledger_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let (year, month, day) = DEFAULT_BACKFILL_START;
        Self {
            source: InfopostConfig::default(),
            polite_delay: Duration::from_millis(DEFAULT_POLITE_DELAY_MS),
            batch_size: DEFAULT_BATCH_SIZE,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            table_name: DEFAULT_TABLE_NAME.to_string(),
            backfill_start: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            ledger_path: None,
        }
    }
}

impl PipelineConfig {
    /// Number of dates in the update window. Never less than one.
    pub fn effective_lookback(&self) -> u32 {
        self.lookback_days.max(1)
    }

    /// Rejects settings no component can work with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(invalid("batch_size", "must be at least 1"));
        }
        if self.table_name.trim().is_empty() {
            return Err(invalid("table_name", "must not be empty"));
        }
        if self.source.retry.max_attempts == 0 {
            return Err(invalid("max_attempts", "must be at least 1"));
        }
        if self.source.router_url.trim().is_empty() {
            return Err(invalid("router_url", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> crate::errors::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
    .into()
}
