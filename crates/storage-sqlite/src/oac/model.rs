//! Database models for OAC records.

use chrono::NaiveDate;
use diesel::prelude::*;

use oac_core::records::{normalize_numeric_str, OacRecord, Quantity};

/// Row as stored. Quantities are kept in their text form so `Text` values
/// survive alongside numbers. Missing natural-key parts are stored as `''`.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::iroquois_oac)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OacRecordDB {
    pub id: i32,
    pub gas_date: NaiveDate,
    pub posting_date: Option<String>,
    pub posting_time: Option<String>,
    pub loc: String,
    pub loc_name: Option<String>,
    pub loc_qti_desc: Option<String>,
    pub loc_purp_desc: String,
    pub flow_ind_desc: String,
    pub meas_basis_desc: Option<String>,
    pub it_indicator: Option<String>,
    pub all_qty_avail: Option<String>,
    pub design_capacity: Option<String>,
    pub operating_capacity: Option<String>,
    pub total_scheduled_quantity: Option<String>,
    pub oac: Option<String>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::iroquois_oac)]
pub struct NewOacRecordDB {
    pub gas_date: NaiveDate,
    pub posting_date: Option<String>,
    pub posting_time: Option<String>,
    pub loc: String,
    pub loc_name: Option<String>,
    pub loc_qti_desc: Option<String>,
    pub loc_purp_desc: String,
    pub flow_ind_desc: String,
    pub meas_basis_desc: Option<String>,
    pub it_indicator: Option<String>,
    pub all_qty_avail: Option<String>,
    pub design_capacity: Option<String>,
    pub operating_capacity: Option<String>,
    pub total_scheduled_quantity: Option<String>,
    pub oac: Option<String>,
}

fn key_part(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn key_part_from_text(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn quantity_text(value: &Option<Quantity>) -> Option<String> {
    value.as_ref().map(Quantity::to_string)
}

fn quantity_from_text(value: Option<String>) -> Option<Quantity> {
    value.as_deref().and_then(normalize_numeric_str)
}

impl From<&OacRecord> for NewOacRecordDB {
    fn from(record: &OacRecord) -> Self {
        Self {
            gas_date: record.gas_date,
            posting_date: record.posting_date.clone(),
            posting_time: record.posting_time.clone(),
            loc: key_part(quantity_text(&record.loc)),
            loc_name: record.loc_name.clone(),
            loc_qti_desc: record.loc_qti_desc.clone(),
            loc_purp_desc: key_part(record.loc_purp_desc.clone()),
            flow_ind_desc: key_part(record.flow_ind_desc.clone()),
            meas_basis_desc: record.meas_basis_desc.clone(),
            it_indicator: record.it_indicator.clone(),
            all_qty_avail: quantity_text(&record.all_qty_avail),
            design_capacity: quantity_text(&record.design_capacity),
            operating_capacity: quantity_text(&record.operating_capacity),
            total_scheduled_quantity: quantity_text(&record.total_scheduled_quantity),
            oac: quantity_text(&record.oac),
        }
    }
}

impl From<OacRecordDB> for OacRecord {
    fn from(db: OacRecordDB) -> Self {
        Self {
            gas_date: db.gas_date,
            posting_date: db.posting_date,
            posting_time: db.posting_time,
            loc: quantity_from_text(key_part_from_text(db.loc)),
            loc_name: db.loc_name,
            loc_qti_desc: db.loc_qti_desc,
            loc_purp_desc: key_part_from_text(db.loc_purp_desc),
            flow_ind_desc: key_part_from_text(db.flow_ind_desc),
            meas_basis_desc: db.meas_basis_desc,
            it_indicator: db.it_indicator,
            all_qty_avail: quantity_from_text(db.all_qty_avail),
            design_capacity: quantity_from_text(db.design_capacity),
            operating_capacity: quantity_from_text(db.operating_capacity),
            total_scheduled_quantity: quantity_from_text(db.total_scheduled_quantity),
            oac: quantity_from_text(db.oac),
        }
    }
}
