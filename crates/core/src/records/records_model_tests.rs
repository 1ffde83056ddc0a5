use chrono::NaiveDate;
use serde_json::json;

use super::*;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

fn record(day: u32, loc: i64, purpose: &str, oac: i64) -> OacRecord {
    OacRecord {
        loc: Some(Quantity::Int(loc)),
        loc_purp_desc: Some(purpose.to_string()),
        flow_ind_desc: Some("R".to_string()),
        oac: Some(Quantity::Int(oac)),
        ..OacRecord::empty(date(day))
    }
}

#[test]
fn test_csv_header_order() {
    let header = csv_header();
    assert_eq!(header.len(), 15);
    assert_eq!(header[0], "gas_date");
    assert_eq!(header[1], "Posting Date");
    assert_eq!(header[3], "Loc");
    assert_eq!(header[14], "OAC");
}

#[test]
fn test_field_lookup_by_label_and_column() {
    assert_eq!(field_by_name("Loc/QTI Desc").unwrap().column, "loc_qti_desc");
    assert_eq!(field_by_name("oac").unwrap().label, "OAC");
    assert!(field_by_name("statusCode").is_none());
}

#[test]
fn test_csv_row_renders_nulls_as_empty() {
    let row = record(10, 10001, "Receipt", 500).csv_row();
    assert_eq!(row.len(), 15);
    assert_eq!(row[0], "2025-06-10");
    assert_eq!(row[1], "");
    assert_eq!(row[3], "10001");
    assert_eq!(row[6], "Receipt");
    assert_eq!(row[14], "500");
}

#[test]
fn test_float_keeps_decimal_point() {
    assert_eq!(Quantity::Float(3.0).to_string(), "3.0");
    assert_eq!(Quantity::Float(3.5).to_string(), "3.5");
    assert_eq!(Quantity::Text("n/a".into()).to_string(), "n/a");
}

#[test]
fn test_serializes_with_explicit_nulls() {
    let value = serde_json::to_value(record(10, 10001, "Receipt", 500)).unwrap();
    assert_eq!(value["gas_date"], json!("2025-06-10"));
    assert_eq!(value["loc"], json!(10001));
    assert_eq!(value["design_capacity"], json!(null));
    assert!(value.as_object().unwrap().contains_key("loc_name"));
    assert_eq!(value.as_object().unwrap().len(), 15);
}

#[test]
fn test_key_ignores_non_key_fields() {
    let a = record(10, 10001, "Receipt", 500);
    let b = record(10, 10001, "Receipt", 900);
    assert_eq!(a.key(), b.key());
    assert_ne!(a.key(), record(11, 10001, "Receipt", 500).key());
    assert_ne!(a.key(), record(10, 10001, "Delivery", 500).key());
}

#[test]
fn test_dedupe_last_value_wins_first_position_kept() {
    let records = vec![
        record(10, 1, "Receipt", 100),
        record(10, 2, "Receipt", 200),
        record(10, 1, "Receipt", 111),
    ];

    let unique = dedupe_by_key(records);

    assert_eq!(unique.len(), 2);
    assert_eq!(unique[0].loc, Some(Quantity::Int(1)));
    assert_eq!(unique[0].oac, Some(Quantity::Int(111)));
    assert_eq!(unique[1].loc, Some(Quantity::Int(2)));
}

#[test]
fn test_csv_round_trip_through_normalizer() {
    let original = OacRecord {
        posting_time: Some("09:00".to_string()),
        operating_capacity: Some(Quantity::Float(1.5)),
        design_capacity: Some(Quantity::Text("TBD".to_string())),
        ..record(10, 10001, "Receipt", 500)
    };
    let row: std::collections::HashMap<String, String> = csv_header()
        .into_iter()
        .map(String::from)
        .zip(original.csv_row())
        .collect();

    let reread = RecordNormalizer::new().normalize_csv_row(&row).unwrap();

    assert_eq!(reread, original);
}
