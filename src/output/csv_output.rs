//! CSV record sink

use crate::output::traits::{OutputResult, RecordSink};
use crate::record::Actor;
use std::path::{Path, PathBuf};

/// Column names, in order
pub const CSV_HEADER: [&str; 3] = ["full_name", "url", "character"];

/// Writes records to a CSV file, replacing any existing file
///
/// # Example
///
/// ```no_run
/// use cast_harvest::output::{CsvSink, RecordSink};
/// use cast_harvest::Actor;
///
/// let mut sink = CsvSink::new("cast.csv");
/// sink.write_records(&[Actor::new("Tim Robbins", "", "Andy Dufresne")]).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecordSink for CsvSink {
    fn write_records(&mut self, records: &[Actor]) -> OutputResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;

        // Written explicitly so an empty result still gets a header row
        writer.write_record(CSV_HEADER)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(())
    }

    fn describe(&self) -> String {
        format!("CSV file '{}'", self.path.display())
    }
}
