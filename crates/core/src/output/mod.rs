//! Output module - where fetched days are written and how prior output is read back.

mod csv_scan;
mod csv_sink;
mod output_traits;
mod store_sink;

pub use csv_scan::{read_records, scan_covered_dates, CsvRecords};
pub use csv_sink::CsvAppendSink;
pub use output_traits::RecordSink;
pub use store_sink::StoreSink;
