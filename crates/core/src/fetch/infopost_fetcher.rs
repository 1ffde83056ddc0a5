//! [`DayFetcher`] over the infopost router.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use oac_infopost::{HttpTransport, InfopostClient, InfopostConfig, RouterTransport};

use super::fetch_model::DayOutcome;
use super::fetch_traits::DayFetcher;
use crate::errors::Result;
use crate::records::{dedupe_by_key, RecordNormalizer};

pub struct InfopostDayFetcher<T = HttpTransport> {
    client: InfopostClient<T>,
    normalizer: RecordNormalizer,
}

impl InfopostDayFetcher<HttpTransport> {
    pub fn new(config: InfopostConfig) -> Result<Self> {
        Ok(Self::from_client(InfopostClient::new(config)?))
    }
}

impl<T: RouterTransport> InfopostDayFetcher<T> {
    pub fn from_client(client: InfopostClient<T>) -> Self {
        Self {
            client,
            normalizer: RecordNormalizer::new(),
        }
    }
}

#[async_trait]
impl<T: RouterTransport> DayFetcher for InfopostDayFetcher<T> {
    async fn fetch_day(&self, date: NaiveDate) -> DayOutcome {
        match self.client.fetch_day(date).await {
            Ok(raws) => {
                let fetched = raws.len();
                let records = dedupe_by_key(self.normalizer.normalize_all(date, &raws));
                if records.len() < fetched {
                    debug!(
                        "{}: collapsed {} duplicate keys",
                        date,
                        fetched - records.len()
                    );
                }
                DayOutcome::from_records(records)
            }
            Err(e) => {
                warn!("{}: fetch failed: {}", date, e);
                DayOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
