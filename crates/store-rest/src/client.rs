//! HTTP client for the PostgREST endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use oac_core::constants::{conflict_target, DEFAULT_TABLE_NAME, GAS_DATE_COLUMN, GAS_DATE_FORMAT};
use oac_core::errors::Result;
use oac_core::{CoveredDates, OacRecord, RecordStore};

use crate::errors::RestStoreError;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Rows requested per page when reading coverage.
const COVERAGE_PAGE_SIZE: usize = 1000;

/// Prefer header for idempotent upserts.
const UPSERT_PREFERENCE: &str = "resolution=merge-duplicates,return=minimal";

#[derive(Debug, Clone)]
pub struct RestStoreSettings {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Service or anon key, sent as `apikey` and bearer token.
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl RestStoreSettings {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE_NAME.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GasDateRow {
    gas_date: NaiveDate,
}

/// [`RecordStore`] over a PostgREST table.
///
/// # Example
///
/// ```ignore
/// let store = PostgrestStore::new(RestStoreSettings::new(url, key))?;
/// store.upsert_batch(&records).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    table_url: String,
    api_key: HeaderValue,
    auth_header: HeaderValue,
}

impl PostgrestStore {
    pub fn new(settings: RestStoreSettings) -> std::result::Result<Self, RestStoreError> {
        let api_key = HeaderValue::from_str(&settings.api_key)
            .map_err(|e| RestStoreError::InvalidKey(e.to_string()))?;
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .map_err(|e| RestStoreError::InvalidKey(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| RestStoreError::Client(e.to_string()))?;

        Ok(Self {
            client,
            table_url: format!(
                "{}/rest/v1/{}",
                settings.url.trim_end_matches('/'),
                settings.table
            ),
            api_key,
            auth_header,
        })
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("apikey", self.api_key.clone());
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }

    async fn post_upsert(&self, records: &[OacRecord]) -> std::result::Result<(), RestStoreError> {
        debug!("[Postgrest] POST {} ({} rows)", self.table_url, records.len());
        let response = self
            .client
            .post(&self.table_url)
            .headers(self.headers())
            .header("Prefer", UPSERT_PREFERENCE)
            .query(&[("on_conflict", conflict_target())])
            .json(records)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, &body))
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        params: &[(&str, String)],
    ) -> std::result::Result<T, RestStoreError> {
        debug!("[Postgrest] GET {} {:?}", self.table_url, params);
        let response = self
            .client
            .get(&self.table_url)
            .headers(self.headers())
            .query(params)
            .send()
            .await?;
        self.parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> std::result::Result<T, RestStoreError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            RestStoreError::Decode(format!(
                "{} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }
}

fn api_error(status: reqwest::StatusCode, body: &str) -> RestStoreError {
    // PostgREST errors carry message/code/details
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(err) => {
            let mut msg = err.message.unwrap_or_else(|| format!("HTTP {}", status));
            if let Some(code) = err.code {
                msg = format!("{} ({})", msg, code);
            }
            if let Some(details) = err.details {
                msg = format!("{}: {}", msg, details);
            }
            msg
        }
        Err(_) => body.chars().take(200).collect(),
    };
    RestStoreError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl RecordStore for PostgrestStore {
    async fn upsert_batch(&self, records: &[OacRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        self.post_upsert(records).await?;
        Ok(records.len())
    }

    async fn covered_dates(&self, start: NaiveDate, end: NaiveDate) -> Result<CoveredDates> {
        let mut covered = CoveredDates::new();
        let mut offset = 0usize;
        loop {
            let params = [
                ("select", GAS_DATE_COLUMN.to_string()),
                (
                    GAS_DATE_COLUMN,
                    format!("gte.{}", start.format(GAS_DATE_FORMAT)),
                ),
                (
                    GAS_DATE_COLUMN,
                    format!("lte.{}", end.format(GAS_DATE_FORMAT)),
                ),
                ("order", GAS_DATE_COLUMN.to_string()),
                ("limit", COVERAGE_PAGE_SIZE.to_string()),
                ("offset", offset.to_string()),
            ];
            let page: Vec<GasDateRow> = self.get_page(&params).await?;
            let fetched = page.len();
            covered.extend(page.into_iter().map(|row| row.gas_date));
            if fetched < COVERAGE_PAGE_SIZE {
                break;
            }
            offset += fetched;
        }
        Ok(covered)
    }
}
