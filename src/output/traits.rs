//! Output sink traits and errors
//!
//! This module defines the trait interface for record sinks. A sink receives
//! the complete result set once, after every item has finished.

use crate::record::Actor;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for the extracted records
pub trait RecordSink {
    /// Writes all records; called once per run
    fn write_records(&mut self, records: &[Actor]) -> OutputResult<()>;

    /// Human-readable description of where records go, for logging
    fn describe(&self) -> String;
}
