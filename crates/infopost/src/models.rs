//! Request and response models for the router endpoint.

use chrono::NaiveDate;
use serde::Serialize;

use crate::codec::RequestCodec;
use crate::config::InfopostConfig;
use crate::errors::InfopostError;

/// One record as returned by the router: source labels to JSON values.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Payload carried (encoded) in the `param` query parameter.
///
/// Field order is part of the wire format: serialized compactly it must read
/// `{"searchDateValue":..,"cycleDescValue":..,"locationValue":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPayload {
    #[serde(rename = "searchDateValue")]
    pub search_date_value: String,
    #[serde(rename = "cycleDescValue")]
    pub cycle_desc_value: String,
    #[serde(rename = "locationValue")]
    pub location_value: String,
}

impl QueryPayload {
    /// Payload for one gas day, e.g. `06/10/2025 09:00 AM`.
    pub fn for_date(date: NaiveDate, config: &InfopostConfig) -> Self {
        Self {
            search_date_value: format!("{} {}", date.format("%m/%d/%Y"), config.search_time),
            cycle_desc_value: config.cycle.clone(),
            location_value: config.location.clone(),
        }
    }

    /// Compact JSON form, before encoding.
    pub fn to_json(&self) -> Result<String, InfopostError> {
        serde_json::to_string(self).map_err(|e| InfopostError::InvalidRequest(e.to_string()))
    }
}

/// Fully encoded query string parameters for one router call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterQuery {
    pub class: String,
    pub operation: String,
    /// Cache buster, Unix milliseconds.
    pub cache_buster: i64,
    pub param: String,
    pub page: u32,
    pub start: u32,
    pub limit: u32,
}

impl RouterQuery {
    /// Build the query for `date` using `codec` for every encoded value.
    pub fn build(
        date: NaiveDate,
        config: &InfopostConfig,
        codec: &dyn RequestCodec,
        cache_buster: i64,
    ) -> Result<Self, InfopostError> {
        let payload = QueryPayload::for_date(date, config).to_json()?;
        Ok(Self {
            class: codec.encode(&config.class_name),
            operation: codec.encode(&config.operation_name),
            cache_buster,
            param: codec.encode(&payload),
            page: 1,
            start: 0,
            limit: config.page_limit,
        })
    }

    /// Query pairs in the order the browser sends them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("class", self.class.clone()),
            ("type", self.operation.clone()),
            ("_dc", self.cache_buster.to_string()),
            ("param", self.param.clone()),
            ("page", self.page.to_string()),
            ("start", self.start.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Base64Codec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_payload_json_is_compact_and_ordered() {
        let payload = QueryPayload::for_date(date(2025, 6, 10), &InfopostConfig::default());
        assert_eq!(
            payload.to_json().unwrap(),
            r#"{"searchDateValue":"06/10/2025 09:00 AM","cycleDescValue":"Timely","locationValue":"All"}"#
        );
    }

    #[test]
    fn test_query_matches_browser_encoding() {
        let query = RouterQuery::build(
            date(2025, 6, 10),
            &InfopostConfig::default(),
            &Base64Codec,
            1_749_550_000_000,
        )
        .unwrap();

        assert_eq!(query.class, "T3BlcmF0aW9uYWxseUF2YWlsYWJsZUNsYXNz");
        assert_eq!(query.operation, "Z2V0R3JkQ3BjdHlPcGVyQXZhaWw=");
        assert_eq!(
            query.param,
            "eyJzZWFyY2hEYXRlVmFsdWUiOiIwNi8xMC8yMDI1IDA5OjAwIEFNIiwiY3ljbGVEZXNjVmFsdWUiOiJUaW1lbHkiLCJsb2NhdGlvblZhbHVlIjoiQWxsIn0="
        );
        assert_eq!(query.limit, 500);
    }

    #[test]
    fn test_pairs_carry_pagination_and_cache_buster() {
        let query =
            RouterQuery::build(date(2024, 1, 2), &InfopostConfig::default(), &Base64Codec, 42)
                .unwrap();
        let pairs = query.to_pairs();
        let names: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["class", "type", "_dc", "param", "page", "start", "limit"]);
        assert_eq!(pairs[2].1, "42");
        assert_eq!(pairs[4].1, "1");
        assert_eq!(pairs[5].1, "0");
    }
}
