use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};

use oac_infopost::{
    InfopostClient, InfopostConfig, InfopostError, RequestCodec, RetryPolicy, RouterQuery,
    RouterTransport,
};

#[derive(Clone, Default)]
struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<Value, InfopostError>>>>,
    queries: Arc<Mutex<Vec<RouterQuery>>>,
    warm_ups: Arc<Mutex<u32>>,
    fail_warm_up: bool,
}

impl ScriptedTransport {
    fn new(script: Vec<Result<Value, InfopostError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(script.into())),
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    fn warm_ups(&self) -> u32 {
        *self.warm_ups.lock().unwrap()
    }
}

#[async_trait]
impl RouterTransport for ScriptedTransport {
    async fn warm_up(&self) -> Result<(), InfopostError> {
        *self.warm_ups.lock().unwrap() += 1;
        if self.fail_warm_up {
            return Err(InfopostError::Network("landing unreachable".to_string()));
        }
        Ok(())
    }

    async fn get_json(&self, query: &RouterQuery) -> Result<Value, InfopostError> {
        self.queries.lock().unwrap().push(query.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(InfopostError::Network("script exhausted".to_string())))
    }
}

fn transient() -> Result<Value, InfopostError> {
    Err(InfopostError::Network("connection reset by peer".to_string()))
}

fn gas_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

fn two_records() -> Value {
    json!([
        {"Loc": "10001", "Loc Purp Desc": "Receipt", "statusCode": 1},
        {"Loc": "10002", "Loc Purp Desc": "Delivery", "statusCode": 1}
    ])
}

#[tokio::test(start_paused = true)]
async fn test_recovers_after_three_transient_failures() {
    let transport = ScriptedTransport::new(vec![
        transient(),
        transient(),
        transient(),
        Ok(two_records()),
    ]);
    let client = InfopostClient::with_transport(InfopostConfig::default(), transport.clone());

    let records = client.fetch_day(gas_day()).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(transport.calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_backoff_waits_exponentially() {
    let transport = ScriptedTransport::new(vec![transient(), transient(), Ok(two_records())]);
    let client = InfopostClient::with_transport(InfopostConfig::default(), transport.clone());

    let started = tokio::time::Instant::now();
    client.fetch_day(gas_day()).await.unwrap();

    // 2s after attempt 1, 4s after attempt 2
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(6), "waited {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(7), "waited {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_gives_up_at_max_attempts() {
    let transport = ScriptedTransport::new(vec![
        transient(),
        transient(),
        transient(),
        Ok(two_records()),
    ]);
    let config = InfopostConfig {
        retry: RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        },
        ..InfopostConfig::default()
    };
    let client = InfopostClient::with_transport(config, transport.clone());

    let err = client.fetch_day(gas_day()).await.unwrap_err();

    assert!(matches!(err, InfopostError::RetriesExhausted { attempts: 3, .. }));
    assert_eq!(transport.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_decode_error_is_not_retried() {
    let transport = ScriptedTransport::new(vec![
        Err(InfopostError::Decode("expected value at line 1 column 1".to_string())),
        Ok(two_records()),
    ]);
    let client = InfopostClient::with_transport(InfopostConfig::default(), transport.clone());

    let err = client.fetch_day(gas_day()).await.unwrap_err();

    assert!(matches!(err, InfopostError::Decode(_)));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_shape_error_is_not_retried() {
    let transport = ScriptedTransport::new(vec![Ok(json!(42)), Ok(two_records())]);
    let client = InfopostClient::with_transport(InfopostConfig::default(), transport.clone());

    let err = client.fetch_day(gas_day()).await.unwrap_err();

    assert!(matches!(err, InfopostError::UnexpectedShape(_)));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_drops_non_success_status_codes() {
    let transport = ScriptedTransport::new(vec![Ok(json!([
        {"Loc": "10001", "statusCode": 1},
        {"Loc": "10002", "statusCode": 0, "statusText": "No data"},
        {"Loc": "10003"}
    ]))]);
    let client = InfopostClient::with_transport(InfopostConfig::default(), transport);

    let records = client.fetch_day(gas_day()).await.unwrap();

    let locs: Vec<&str> = records.iter().map(|r| r["Loc"].as_str().unwrap()).collect();
    assert_eq!(locs, vec!["10001", "10003"]);
}

#[tokio::test]
async fn test_flattens_index_keyed_object() {
    let transport = ScriptedTransport::new(vec![Ok(json!({
        "1": {"Loc": "second"},
        "0": {"Loc": "first"}
    }))]);
    let client = InfopostClient::with_transport(InfopostConfig::default(), transport);

    let records = client.fetch_day(gas_day()).await.unwrap();

    assert_eq!(records[0]["Loc"], "first");
    assert_eq!(records[1]["Loc"], "second");
}

#[tokio::test]
async fn test_warm_up_runs_once_and_failure_is_tolerated() {
    let transport = ScriptedTransport {
        fail_warm_up: true,
        ..ScriptedTransport::new(vec![Ok(json!([])), Ok(json!([]))])
    };
    let client = InfopostClient::with_transport(InfopostConfig::default(), transport.clone());

    assert!(client.fetch_day(gas_day()).await.unwrap().is_empty());
    assert!(client.fetch_day(gas_day()).await.unwrap().is_empty());

    assert_eq!(transport.warm_ups(), 1);
    assert_eq!(transport.calls(), 2);
}

struct ReversedCodec;

impl RequestCodec for ReversedCodec {
    fn encode(&self, plain: &str) -> String {
        plain.chars().rev().collect()
    }

    fn decode(&self, encoded: &str) -> Result<String, InfopostError> {
        Ok(encoded.chars().rev().collect())
    }
}

#[tokio::test]
async fn test_custom_codec_encodes_parameters() {
    let transport = ScriptedTransport::new(vec![Ok(json!([]))]);
    let client = InfopostClient::with_transport(InfopostConfig::default(), transport.clone())
        .with_codec(ReversedCodec);

    client.fetch_day(gas_day()).await.unwrap();

    let queries = transport.queries.lock().unwrap();
    assert_eq!(queries[0].class, "ssalCelbaliavAyllanoitarepO");
    let payload = ReversedCodec.decode(&queries[0].param).unwrap();
    assert!(payload.contains("06/10/2025 09:00 AM"));
}
