//! Output module for writing records and run summaries
//!
//! This module handles:
//! - Writing the flattened result set to CSV
//! - Summarizing how each item of a run ended

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::{CsvSink, CSV_HEADER};
pub use stats::{print_summary, CrawlSummary};
pub use traits::{OutputError, OutputResult, RecordSink};
