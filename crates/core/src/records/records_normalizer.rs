//! Maps raw source values onto the canonical [`OacRecord`] schema.
//!
//! The same rules apply to router responses and to rows re-read from the
//! durable CSV, so a record survives the round trip through the file
//! unchanged.

use std::collections::HashMap;

use chrono::NaiveDate;
use oac_infopost::RawRecord;
use serde_json::Value;

use super::records_constants::{FieldKind, FieldSpec, FIELDS};
use super::records_model::{OacRecord, Quantity};
use crate::constants::{GAS_DATE_COLUMN, GAS_DATE_FORMAT};
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct RecordNormalizer;

impl RecordNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes one raw router record for `gas_date`.
    ///
    /// Labels missing from `raw` become nulls; unknown labels are ignored.
    pub fn normalize(&self, gas_date: NaiveDate, raw: &RawRecord) -> OacRecord {
        let mut record = OacRecord::empty(gas_date);
        for field in FIELDS.iter() {
            if let Some(value) = raw.get(field.label) {
                assign(&mut record, field, value);
            }
        }
        record
    }

    pub fn normalize_all(&self, gas_date: NaiveDate, raws: &[RawRecord]) -> Vec<OacRecord> {
        raws.iter().map(|raw| self.normalize(gas_date, raw)).collect()
    }

    /// Normalizes a durable CSV row given as header -> cell.
    ///
    /// Headers may be either source labels or column names. Fails only when
    /// `gas_date` is missing or unparseable.
    pub fn normalize_csv_row(&self, row: &HashMap<String, String>) -> Result<OacRecord> {
        let gas_date = row
            .get(GAS_DATE_COLUMN)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::InvalidRecord("row has no gas_date".to_string()))?;
        let gas_date = NaiveDate::parse_from_str(gas_date, GAS_DATE_FORMAT)?;

        let mut record = OacRecord::empty(gas_date);
        for field in FIELDS.iter() {
            let cell = row.get(field.label).or_else(|| row.get(field.column));
            if let Some(cell) = cell {
                assign(&mut record, field, &Value::String(cell.clone()));
            }
        }
        Ok(record)
    }
}

fn assign(record: &mut OacRecord, field: &FieldSpec, value: &Value) {
    match field.kind {
        FieldKind::Numeric => {
            let quantity = normalize_numeric(value);
            match field.column {
                "loc" => record.loc = quantity,
                "all_qty_avail" => record.all_qty_avail = quantity,
                "design_capacity" => record.design_capacity = quantity,
                "operating_capacity" => record.operating_capacity = quantity,
                "total_scheduled_quantity" => record.total_scheduled_quantity = quantity,
                "oac" => record.oac = quantity,
                _ => {}
            }
        }
        FieldKind::Text => {
            let text = normalize_text(value);
            match field.column {
                "posting_date" => record.posting_date = text,
                "posting_time" => record.posting_time = text,
                "loc_name" => record.loc_name = text,
                "loc_qti_desc" => record.loc_qti_desc = text,
                "loc_purp_desc" => record.loc_purp_desc = text,
                "flow_ind_desc" => record.flow_ind_desc = text,
                "meas_basis_desc" => record.meas_basis_desc = text,
                "it_indicator" => record.it_indicator = text,
                _ => {}
            }
        }
    }
}

/// Text field rule: null and blank become `None`, other scalars their JSON text.
pub fn normalize_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        other => Some(other.to_string()),
    }
}

/// Numeric field rule for JSON values.
pub fn normalize_numeric(value: &Value) -> Option<Quantity> {
    match value {
        Value::Null => None,
        Value::Number(n) => match n.as_i64() {
            Some(int) => Some(Quantity::Int(int)),
            None => match n.as_f64() {
                Some(float) if float.is_finite() => Some(Quantity::Float(float)),
                _ => Some(Quantity::Text(n.to_string())),
            },
        },
        Value::String(s) => normalize_numeric_str(s),
        other => Some(Quantity::Text(other.to_string())),
    }
}

/// Numeric field rule for text: strip thousands separators and whitespace,
/// then integer, then finite float, else the original text.
pub fn normalize_numeric_str(raw: &str) -> Option<Quantity> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(int) = cleaned.parse::<i64>() {
        return Some(Quantity::Int(int));
    }
    match cleaned.parse::<f64>() {
        Ok(float) if float.is_finite() => Some(Quantity::Float(float)),
        _ => Some(Quantity::Text(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_thousands_separator_is_stripped() {
        assert_eq!(normalize_numeric_str("12,345"), Some(Quantity::Int(12345)));
        assert_eq!(
            normalize_numeric_str(" 1,234,567 "),
            Some(Quantity::Int(1_234_567))
        );
    }

    #[test]
    fn test_empty_is_null() {
        assert_eq!(normalize_numeric_str(""), None);
        assert_eq!(normalize_numeric_str("   "), None);
        assert_eq!(normalize_text(&json!("")), None);
        assert_eq!(normalize_text(&Value::Null), None);
    }

    #[test]
    fn test_decimal_is_float() {
        assert_eq!(normalize_numeric_str("3.5"), Some(Quantity::Float(3.5)));
        assert_eq!(normalize_numeric_str("-0.25"), Some(Quantity::Float(-0.25)));
    }

    #[test]
    fn test_unparseable_is_kept_verbatim() {
        assert_eq!(
            normalize_numeric_str("N/A"),
            Some(Quantity::Text("N/A".to_string()))
        );
        assert_eq!(
            normalize_numeric_str("NaN"),
            Some(Quantity::Text("NaN".to_string()))
        );
    }

    #[test]
    fn test_json_numbers_map_directly() {
        assert_eq!(normalize_numeric(&json!(42)), Some(Quantity::Int(42)));
        assert_eq!(normalize_numeric(&json!(1.5)), Some(Quantity::Float(1.5)));
        assert_eq!(normalize_numeric(&json!(true)), Some(Quantity::Text("true".into())));
    }

    #[test]
    fn test_non_string_text_uses_json_text() {
        assert_eq!(normalize_text(&json!(7)), Some("7".to_string()));
        assert_eq!(normalize_text(&json!(false)), Some("false".to_string()));
    }

    #[test]
    fn test_normalize_raw_record() {
        let raw = json!({
            "Posting Date": "06/10/2025",
            "Loc": "10,001",
            "Loc Name": "Waddington",
            "Loc Purp Desc": "Receipt",
            "Flow Ind Desc": "R",
            "Design Capacity": "1,200,000",
            "Operating Capacity": "1,150,000.5",
            "OAC": "",
            "statusCode": 1,
            "Unknown Label": "ignored"
        });
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        let record = RecordNormalizer::new().normalize(date, raw.as_object().unwrap());

        assert_eq!(record.gas_date, date);
        assert_eq!(record.posting_date.as_deref(), Some("06/10/2025"));
        assert_eq!(record.loc, Some(Quantity::Int(10001)));
        assert_eq!(record.loc_name.as_deref(), Some("Waddington"));
        assert_eq!(record.design_capacity, Some(Quantity::Int(1_200_000)));
        assert_eq!(record.operating_capacity, Some(Quantity::Float(1_150_000.5)));
        assert_eq!(record.oac, None);
        assert_eq!(record.total_scheduled_quantity, None);
        assert_eq!(record.meas_basis_desc, None);
    }

    #[test]
    fn test_csv_row_accepts_labels_or_columns() {
        let by_label: HashMap<String, String> = [
            ("gas_date", "2025-06-10"),
            ("Loc", "10001"),
            ("Loc Purp Desc", "Receipt"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let by_column: HashMap<String, String> = [
            ("gas_date", "2025-06-10"),
            ("loc", "10001"),
            ("loc_purp_desc", "Receipt"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let normalizer = RecordNormalizer::new();
        assert_eq!(
            normalizer.normalize_csv_row(&by_label).unwrap(),
            normalizer.normalize_csv_row(&by_column).unwrap()
        );
    }

    #[test]
    fn test_csv_row_without_date_is_rejected() {
        let row: HashMap<String, String> =
            [("Loc".to_string(), "1".to_string())].into_iter().collect();
        assert!(matches!(
            RecordNormalizer::new().normalize_csv_row(&row),
            Err(Error::InvalidRecord(_))
        ));
    }
}
