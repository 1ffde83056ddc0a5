//! OAC Core - domain model and acquisition pipeline.
//!
//! This crate turns the raw router records fetched by `oac-infopost` into
//! canonical [`OacRecord`]s and drives the backfill, the incremental update
//! and the CSV load. It is store-agnostic: [`RecordStore`] is implemented by
//! the `store-rest` and `storage-sqlite` crates.

pub mod config;
pub mod constants;
pub mod cursor;
pub mod errors;
pub mod fetch;
pub mod ledger;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod store;
pub mod utils;

pub use config::PipelineConfig;
pub use cursor::{CoveredDates, FetchCursor};
pub use fetch::{DayFetcher, DayOutcome, InfopostDayFetcher};
pub use ledger::{GapEntry, GapLedger, GapStage};
pub use output::{CsvAppendSink, RecordSink, StoreSink};
pub use pipeline::{
    BackfillReport, BackfillRunner, CsvLoader, IncrementalUpdater, LoadReport, UpdateReport,
};
pub use records::{OacRecord, Quantity, RecordKey, RecordNormalizer};
pub use store::{RecordStore, StoreUpsertClient, UpsertReport};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
