//! OAC record domain model.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::records_constants::FIELDS;
use crate::constants::GAS_DATE_FORMAT;

/// A numeric source value.
///
/// Values that do not parse as a number are kept verbatim as `Text` so nothing
/// the source published is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Int(value) => write!(f, "{}", value),
            // Debug formatting keeps the decimal point, so 3.0 stays a float on re-read.
            Quantity::Float(value) => write!(f, "{:?}", value),
            Quantity::Text(value) => f.write_str(value),
        }
    }
}

/// One posting: a location, flow purpose and flow direction on a gas day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OacRecord {
    pub gas_date: NaiveDate,
    pub posting_date: Option<String>,
    pub posting_time: Option<String>,
    pub loc: Option<Quantity>,
    pub loc_name: Option<String>,
    pub loc_qti_desc: Option<String>,
    pub loc_purp_desc: Option<String>,
    pub flow_ind_desc: Option<String>,
    pub meas_basis_desc: Option<String>,
    pub it_indicator: Option<String>,
    pub all_qty_avail: Option<Quantity>,
    pub design_capacity: Option<Quantity>,
    pub operating_capacity: Option<Quantity>,
    pub total_scheduled_quantity: Option<Quantity>,
    pub oac: Option<Quantity>,
}

/// Natural key of an [`OacRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub gas_date: NaiveDate,
    pub loc: Option<String>,
    pub loc_purp_desc: Option<String>,
    pub flow_ind_desc: Option<String>,
}

impl OacRecord {
    /// A record for `gas_date` with every field null.
    pub fn empty(gas_date: NaiveDate) -> Self {
        Self {
            gas_date,
            posting_date: None,
            posting_time: None,
            loc: None,
            loc_name: None,
            loc_qti_desc: None,
            loc_purp_desc: None,
            flow_ind_desc: None,
            meas_basis_desc: None,
            it_indicator: None,
            all_qty_avail: None,
            design_capacity: None,
            operating_capacity: None,
            total_scheduled_quantity: None,
            oac: None,
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            gas_date: self.gas_date,
            loc: self.loc.as_ref().map(|loc| loc.to_string()),
            loc_purp_desc: self.loc_purp_desc.clone(),
            flow_ind_desc: self.flow_ind_desc.clone(),
        }
    }

    /// Text value of the field stored under `column`, as written to the durable CSV.
    pub fn column_text(&self, column: &str) -> Option<String> {
        let text = |value: &Option<String>| value.clone();
        let quantity = |value: &Option<Quantity>| value.as_ref().map(|q| q.to_string());
        match column {
            "posting_date" => text(&self.posting_date),
            "posting_time" => text(&self.posting_time),
            "loc" => quantity(&self.loc),
            "loc_name" => text(&self.loc_name),
            "loc_qti_desc" => text(&self.loc_qti_desc),
            "loc_purp_desc" => text(&self.loc_purp_desc),
            "flow_ind_desc" => text(&self.flow_ind_desc),
            "meas_basis_desc" => text(&self.meas_basis_desc),
            "it_indicator" => text(&self.it_indicator),
            "all_qty_avail" => quantity(&self.all_qty_avail),
            "design_capacity" => quantity(&self.design_capacity),
            "operating_capacity" => quantity(&self.operating_capacity),
            "total_scheduled_quantity" => quantity(&self.total_scheduled_quantity),
            "oac" => quantity(&self.oac),
            _ => None,
        }
    }

    /// Row in durable CSV column order; nulls become empty cells.
    pub fn csv_row(&self) -> Vec<String> {
        std::iter::once(self.gas_date.format(GAS_DATE_FORMAT).to_string())
            .chain(
                FIELDS
                    .iter()
                    .map(|field| self.column_text(field.column).unwrap_or_default()),
            )
            .collect()
    }
}

/// Collapses records sharing a key.
///
/// Each key keeps the position of its first occurrence and the value of its
/// last one.
pub fn dedupe_by_key(records: Vec<OacRecord>) -> Vec<OacRecord> {
    use std::collections::HashMap;

    let mut positions: HashMap<RecordKey, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<OacRecord> = Vec::with_capacity(records.len());
    for record in records {
        match positions.get(&record.key()) {
            Some(&idx) => unique[idx] = record,
            None => {
                positions.insert(record.key(), unique.len());
                unique.push(record);
            }
        }
    }
    unique
}
