//! Pipeline module - the drivers that tie fetching, normalization and writing together.
//!
//! - [`BackfillRunner`] - resumable range fetch into an append-only sink
//! - [`IncrementalUpdater`] - trailing window refresh upserted into a store
//! - [`CsvLoader`] - durable CSV into a store

mod backfill;
mod csv_loader;
mod incremental;
mod pipeline_model;

pub use backfill::BackfillRunner;
pub use csv_loader::CsvLoader;
pub use incremental::IncrementalUpdater;
pub use pipeline_model::{BackfillReport, LoadReport, UpdateReport};
