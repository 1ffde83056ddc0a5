use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::tempdir;

use oac_core::{CoveredDates, OacRecord, Quantity, RecordStore, StoreUpsertClient};
use oac_storage_sqlite::{open, OacRepository};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

fn record(day: u32, loc: i64, purpose: &str, oac: Quantity) -> OacRecord {
    OacRecord {
        loc: Some(Quantity::Int(loc)),
        loc_name: Some("Wright".to_string()),
        loc_purp_desc: Some(purpose.to_string()),
        flow_ind_desc: Some("R".to_string()),
        oac: Some(oac),
        ..OacRecord::empty(d(day))
    }
}

fn repository(dir: &tempfile::TempDir) -> (OacRepository, String) {
    let path = dir.path().join("mirror").join("oac.db");
    let path = path.to_str().unwrap().to_string();
    let (pool, writer) = open(&path).unwrap();
    (OacRepository::new(pool, writer), path)
}

#[tokio::test]
async fn test_upsert_then_read_back() {
    let dir = tempdir().unwrap();
    let (repo, _) = repository(&dir);
    let records = vec![
        record(10, 10001, "Receipt", Quantity::Int(1200)),
        record(10, 10002, "Delivery", Quantity::Float(3.5)),
        record(10, 10003, "Delivery", Quantity::Text("TBD".to_string())),
    ];

    assert_eq!(repo.upsert_batch(&records).await.unwrap(), 3);

    let stored = repo.records_for_date(d(10)).unwrap();
    assert_eq!(stored, records);
}

#[tokio::test]
async fn test_same_key_replaces_row() {
    let dir = tempdir().unwrap();
    let (repo, _) = repository(&dir);

    repo.upsert_batch(&[record(10, 10001, "Receipt", Quantity::Int(100))])
        .await
        .unwrap();
    repo.upsert_batch(&[record(10, 10001, "Receipt", Quantity::Int(250))])
        .await
        .unwrap();

    assert_eq!(repo.count().unwrap(), 1);
    let stored = repo.records_for_date(d(10)).unwrap();
    assert_eq!(stored[0].oac, Some(Quantity::Int(250)));
}

#[tokio::test]
async fn test_missing_key_parts_still_replace() {
    let dir = tempdir().unwrap();
    let (repo, _) = repository(&dir);
    let repo = Arc::new(repo);
    let partial = |value: i64| OacRecord {
        loc: None,
        flow_ind_desc: None,
        ..record(10, 0, "Receipt", Quantity::Int(value))
    };
    let client = StoreUpsertClient::new(repo.clone(), 500);

    client.upsert_all(vec![partial(100)]).await;
    client.upsert_all(vec![partial(250)]).await;

    assert_eq!(repo.count().unwrap(), 1);
    let stored = repo.records_for_date(d(10)).unwrap();
    assert_eq!(stored, vec![partial(250)]);
    assert_eq!(stored[0].loc, None);
    assert_eq!(stored[0].flow_ind_desc, None);
}

#[tokio::test]
async fn test_covered_dates_within_range() {
    let dir = tempdir().unwrap();
    let (repo, _) = repository(&dir);
    let records: Vec<OacRecord> = [1, 1, 3, 7]
        .iter()
        .enumerate()
        .map(|(i, day)| record(*day, i as i64, "Receipt", Quantity::Int(1)))
        .collect();
    repo.upsert_batch(&records).await.unwrap();

    let covered = repo.covered_dates(d(2), d(30)).await.unwrap();

    let expected: CoveredDates = [d(3), d(7)].into_iter().collect();
    assert_eq!(covered, expected);
}

#[tokio::test]
async fn test_upsert_client_over_sqlite() {
    let dir = tempdir().unwrap();
    let (repo, _) = repository(&dir);
    let repo = Arc::new(repo);
    let records: Vec<OacRecord> = (0..1200)
        .map(|i| record(10, i, "Receipt", Quantity::Int(i)))
        .collect();

    let report = StoreUpsertClient::new(repo.clone(), 500)
        .upsert_all(records)
        .await;

    assert_eq!(report.written, 1200);
    assert_eq!(repo.count().unwrap(), 1200);
}

#[tokio::test]
async fn test_schema_has_unique_natural_key() {
    let dir = tempdir().unwrap();
    let (_repo, path) = repository(&dir);

    let conn = rusqlite::Connection::open(&path).unwrap();
    let unique: i64 = conn
        .query_row(
            "SELECT \"unique\" FROM pragma_index_list('iroquois_oac') WHERE name = 'iroquois_oac_natural_key'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(unique, 1);

    let columns: Vec<String> = conn
        .prepare("SELECT name FROM pragma_index_info('iroquois_oac_natural_key') ORDER BY seqno")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .map(|c| c.unwrap())
        .collect();
    assert_eq!(columns, vec!["gas_date", "loc", "loc_purp_desc", "flow_ind_desc"]);
}

#[test]
fn test_reopen_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("oac.db");
    let path = path.to_str().unwrap();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    rt.block_on(async {
        open(path).unwrap();
        open(path).unwrap();
    });
}
