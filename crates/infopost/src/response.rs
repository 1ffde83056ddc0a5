//! Response shape handling.
//!
//! Depending on the client the router body decodes either to a JSON array of
//! records or to an object keyed by stringified indices (`{"0": {..}, "1": {..}}`).
//! Both are flattened into an ordered list here.

use serde_json::Value;

use crate::errors::InfopostError;
use crate::models::RawRecord;

/// `statusCode` value the router uses for a populated record.
pub const SUCCESS_STATUS_CODE: i64 = 1;

/// Flatten a router body into records, in source order.
///
/// Index-keyed objects are ordered by ascending numeric key; keys that are
/// not all digits are ignored.
pub fn flatten_response(body: Value) -> Result<Vec<RawRecord>, InfopostError> {
    let items: Vec<Value> = match body {
        Value::Array(items) => items,
        Value::Object(map) => {
            let mut indexed: Vec<(u64, Value)> = map
                .into_iter()
                .filter(|(key, _)| !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()))
                .filter_map(|(key, value)| key.parse::<u64>().ok().map(|idx| (idx, value)))
                .collect();
            indexed.sort_by_key(|(idx, _)| *idx);
            indexed.into_iter().map(|(_, value)| value).collect()
        }
        other => {
            return Err(InfopostError::UnexpectedShape(format!(
                "expected array or object, got {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(InfopostError::UnexpectedShape(format!(
                "record {} is {}, expected object",
                idx,
                json_kind(&other)
            ))),
        })
        .collect()
}

/// Whether a record carries data.
///
/// A missing or null `statusCode` counts as success, as does the number `1`
/// (`1.0` included). Anything else, the string `"1"` too, marks an empty slot.
pub fn is_successful(record: &RawRecord) -> bool {
    match record.get("statusCode") {
        None | Some(Value::Null) => true,
        Some(Value::Number(n)) => n.as_f64() == Some(SUCCESS_STATUS_CODE as f64),
        Some(_) => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
