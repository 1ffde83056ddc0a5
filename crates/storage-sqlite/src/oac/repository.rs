use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::{NewOacRecordDB, OacRecordDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::iroquois_oac;
use crate::schema::iroquois_oac::dsl::*;
use oac_core::errors::Result;
use oac_core::{CoveredDates, OacRecord, RecordStore};

/// Rows per INSERT statement, kept well under SQLite's bound-parameter limit.
const INSERT_CHUNK: usize = 1000;

pub struct OacRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl OacRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    /// All stored rows for one gas day.
    pub fn records_for_date(&self, date: NaiveDate) -> Result<Vec<OacRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = iroquois_oac::table
            .filter(gas_date.eq(date))
            .order(id.asc())
            .select(OacRecordDB::as_select())
            .load::<OacRecordDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(OacRecord::from).collect())
    }

    pub fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let total = iroquois_oac::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(total)
    }
}

#[async_trait]
impl RecordStore for OacRepository {
    async fn upsert_batch(&self, records: &[OacRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let rows: Vec<NewOacRecordDB> = records.iter().map(NewOacRecordDB::from).collect();
        let total = rows.len();

        self.writer
            .exec(move |conn| {
                for chunk in rows.chunks(INSERT_CHUNK) {
                    diesel::replace_into(iroquois_oac::table)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(total)
            })
            .await
    }

    async fn covered_dates(&self, start: NaiveDate, end: NaiveDate) -> Result<CoveredDates> {
        let mut conn = get_connection(&self.pool)?;
        let dates = iroquois_oac::table
            .filter(gas_date.ge(start))
            .filter(gas_date.le(end))
            .select(gas_date)
            .distinct()
            .load::<NaiveDate>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(dates.into_iter().collect())
    }
}
