//! Retrying client for one gas day of OAC postings.

use chrono::{NaiveDate, Utc};
use log::{debug, warn};
use tokio::sync::OnceCell;

use crate::codec::{Base64Codec, RequestCodec};
use crate::config::InfopostConfig;
use crate::errors::{InfopostError, RetryClass};
use crate::models::{RawRecord, RouterQuery};
use crate::response::{flatten_response, is_successful};
use crate::transport::{HttpTransport, RouterTransport};

/// Fetches the raw records the router publishes for a gas day.
///
/// The landing page is visited once, lazily, before the first router call;
/// a failed visit is logged and otherwise ignored. Transient failures are
/// retried according to [`InfopostConfig::retry`]; decode and shape errors are
/// returned immediately.
///
/// # Example
///
/// ```ignore
/// use oac_infopost::{InfopostClient, InfopostConfig};
///
/// let client = InfopostClient::new(InfopostConfig::default())?;
/// let records = client.fetch_day(chrono::NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()).await?;
/// ```
pub struct InfopostClient<T = HttpTransport> {
    config: InfopostConfig,
    transport: T,
    codec: Box<dyn RequestCodec>,
    warmed: OnceCell<()>,
}

impl InfopostClient<HttpTransport> {
    /// Create a client talking HTTP to the configured router.
    pub fn new(config: InfopostConfig) -> Result<Self, InfopostError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: RouterTransport> InfopostClient<T> {
    /// Create a client over an arbitrary transport, using base64 encoding.
    pub fn with_transport(config: InfopostConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            codec: Box::new(Base64Codec),
            warmed: OnceCell::new(),
        }
    }

    /// Replace the request codec.
    pub fn with_codec(mut self, codec: impl RequestCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    pub fn config(&self) -> &InfopostConfig {
        &self.config
    }

    async fn ensure_warm(&self) {
        self.warmed
            .get_or_init(|| async {
                if let Err(e) = self.transport.warm_up().await {
                    warn!("[Infopost] Landing page visit failed (continuing): {}", e);
                }
            })
            .await;
    }

    /// Fetch the records for `date`, keeping only populated slots.
    ///
    /// Returns [`InfopostError::RetriesExhausted`] when every attempt failed
    /// with a transient error.
    pub async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<RawRecord>, InfopostError> {
        self.ensure_warm().await;

        let max_attempts = self.config.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.fetch_once(date).await {
                Ok(records) => return Ok(records),
                Err(e) if e.retry_class() == RetryClass::WithBackoff => {
                    if attempt >= max_attempts {
                        warn!(
                            "[Infopost] {} failed after {} attempts: {}",
                            date, attempt, e
                        );
                        return Err(InfopostError::RetriesExhausted {
                            attempts: attempt,
                            last: Box::new(e),
                        });
                    }
                    let wait = self.config.retry.delay_after(attempt);
                    warn!(
                        "[Infopost] {} retry {}/{}: {} - waiting {:?}",
                        date, attempt, max_attempts, e, wait
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, date: NaiveDate) -> Result<Vec<RawRecord>, InfopostError> {
        let query = RouterQuery::build(
            date,
            &self.config,
            self.codec.as_ref(),
            Utc::now().timestamp_millis(),
        )?;
        let body = self.transport.get_json(&query).await?;
        let records = flatten_response(body)?;

        let total = records.len();
        let kept: Vec<RawRecord> = records.into_iter().filter(is_successful).collect();
        if kept.len() < total {
            debug!(
                "[Infopost] {}: dropped {} empty slots of {}",
                date,
                total - kept.len(),
                total
            );
        }
        Ok(kept)
    }
}
