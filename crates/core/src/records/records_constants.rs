//! Mapping between source labels and canonical columns.

/// How a field's value is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
}

/// One source field: its label on the wire and in the durable CSV, and its
/// column name in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
}

const fn text(label: &'static str, column: &'static str) -> FieldSpec {
    FieldSpec {
        label,
        column,
        kind: FieldKind::Text,
    }
}

const fn numeric(label: &'static str, column: &'static str) -> FieldSpec {
    FieldSpec {
        label,
        column,
        kind: FieldKind::Numeric,
    }
}

/// Source fields in durable CSV column order (after `gas_date`).
pub const FIELDS: [FieldSpec; 14] = [
    text("Posting Date", "posting_date"),
    text("Posting Time", "posting_time"),
    numeric("Loc", "loc"),
    text("Loc Name", "loc_name"),
    text("Loc/QTI Desc", "loc_qti_desc"),
    text("Loc Purp Desc", "loc_purp_desc"),
    text("Flow Ind Desc", "flow_ind_desc"),
    text("Meas Basis Desc", "meas_basis_desc"),
    text("IT Indicator", "it_indicator"),
    numeric("All Qty Avail", "all_qty_avail"),
    numeric("Design Capacity", "design_capacity"),
    numeric("Operating Capacity", "operating_capacity"),
    numeric("Total Scheduled Quantity", "total_scheduled_quantity"),
    numeric("OAC", "oac"),
];

/// Header row of the durable CSV.
pub fn csv_header() -> Vec<&'static str> {
    std::iter::once(crate::constants::GAS_DATE_COLUMN)
        .chain(FIELDS.iter().map(|field| field.label))
        .collect()
}

/// Looks up a field by its source label or its column name.
pub fn field_by_name(name: &str) -> Option<&'static FieldSpec> {
    FIELDS
        .iter()
        .find(|field| field.label == name || field.column == name)
}
