//! Row extractor state machine
//!
//! Scanning starts in `Scanning`; the first row containing the sentinel
//! moves it to `Stopped`, after which no row is inspected.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExtractorState {
    /// Rows are still being inspected
    #[default]
    Scanning,

    /// Sentinel seen; terminal
    Stopped,
}

impl ExtractorState {
    /// Returns true if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// Applies the outcome of inspecting one row
    ///
    /// `Stopped` is absorbing: once reached it is never left.
    pub fn after_row(self, sentinel_found: bool) -> Self {
        match self {
            Self::Scanning if sentinel_found => Self::Stopped,
            state => state,
        }
    }
}

impl fmt::Display for ExtractorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scanning => write!(f, "scanning"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}
