//! Records module - the OAC posting model and its normalization rules.

mod records_constants;
mod records_model;
mod records_normalizer;

#[cfg(test)]
mod records_model_tests;

pub use records_constants::{csv_header, field_by_name, FieldKind, FieldSpec, FIELDS};
pub use records_model::{dedupe_by_key, OacRecord, Quantity, RecordKey};
pub use records_normalizer::{
    normalize_numeric, normalize_numeric_str, normalize_text, RecordNormalizer,
};
