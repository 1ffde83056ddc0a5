//! HTTP transport for the router endpoint.
//!
//! [`RouterTransport`] is the seam between the retrying client and the wire.
//! [`HttpTransport`] keeps one reqwest client (and its cookie jar) for the
//! whole run, so the session cookie from the landing page is replayed on every
//! router call.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;

use crate::config::InfopostConfig;
use crate::errors::InfopostError;
use crate::models::RouterQuery;

/// A single request/response exchange with the router.
#[async_trait]
pub trait RouterTransport: Send + Sync {
    /// Visit the landing page so the server can set its session cookie.
    async fn warm_up(&self) -> Result<(), InfopostError>;

    /// Issue one router call and decode the body as JSON.
    async fn get_json(&self, query: &RouterQuery) -> Result<Value, InfopostError>;
}

/// reqwest-backed transport with a persistent cookie store.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    router_url: String,
    landing_url: String,
    warm_up_timeout: std::time::Duration,
}

impl HttpTransport {
    /// Build a transport sending browser-like headers.
    pub fn new(config: &InfopostConfig) -> Result<Self, InfopostError> {
        let client = Client::builder()
            .default_headers(Self::default_headers(config)?)
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| InfopostError::InvalidRequest(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            router_url: config.router_url.clone(),
            landing_url: config.landing_url.clone(),
            warm_up_timeout: config.warm_up_timeout,
        })
    }

    fn default_headers(config: &InfopostConfig) -> Result<HeaderMap, InfopostError> {
        let invalid = |e: header::InvalidHeaderValue| InfopostError::InvalidRequest(e.to_string());

        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(invalid)?,
        );
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        headers.insert(
            header::REFERER,
            HeaderValue::from_str(&config.landing_url).map_err(invalid)?,
        );
        Ok(headers)
    }
}

#[async_trait]
impl RouterTransport for HttpTransport {
    async fn warm_up(&self) -> Result<(), InfopostError> {
        debug!("[Infopost] GET {}", self.landing_url);
        // Status is irrelevant here; only the Set-Cookie header matters.
        self.client
            .get(&self.landing_url)
            .timeout(self.warm_up_timeout)
            .send()
            .await?;
        Ok(())
    }

    async fn get_json(&self, query: &RouterQuery) -> Result<Value, InfopostError> {
        debug!("[Infopost] GET {} (_dc={})", self.router_url, query.cache_buster);
        let response = self
            .client
            .get(&self.router_url)
            .query(&query.to_pairs())
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| InfopostError::Decode(e.to_string()))
    }
}
