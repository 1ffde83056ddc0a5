//! Durable append-only CSV output.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};

use super::output_traits::RecordSink;
use crate::errors::Result;
use crate::records::{csv_header, OacRecord};

/// Appends records to the durable CSV.
///
/// The header is written only when the file is new or empty. A file whose
/// last line was cut short gets a newline first so the next row starts on
/// its own line. Each day is encoded in memory and appended with a single
/// write, then flushed before [`RecordSink::write_day`] returns.
pub struct CsvAppendSink {
    path: PathBuf,
    file: File,
}

impl CsvAppendSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;

        let len = file.metadata()?.len();
        let needs_header = len == 0;
        if !needs_header && !ends_with_newline(&mut file, len)? {
            warn!(
                "{} does not end with a newline; repairing before appending",
                path.display()
            );
            file.write_all(b"\n")?;
        }

        if needs_header {
            debug!("Writing header to {}", path.display());
            let header = encode_rows(std::iter::once(csv_header()))?;
            append_bytes(&mut file, &header)?;
        }

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn encode_rows<I, R>(rows: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()).into())
}

/// Appends a whole day's rows with one `write_all`.
fn append_day<W: Write>(out: &mut W, records: &[OacRecord]) -> Result<usize> {
    let bytes = encode_rows(records.iter().map(OacRecord::csv_row))?;
    append_bytes(out, &bytes)?;
    Ok(records.len())
}

fn append_bytes<W: Write>(out: &mut W, bytes: &[u8]) -> Result<()> {
    out.write_all(bytes)?;
    out.flush()?;
    Ok(())
}

fn ends_with_newline(file: &mut File, len: u64) -> Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[async_trait]
impl RecordSink for CsvAppendSink {
    async fn write_day(&mut self, _gas_date: NaiveDate, records: &[OacRecord]) -> Result<usize> {
        append_day(&mut self.file, records)
    }
}
