//! Termination reasons for item processing
//!
//! Every item worker ends in exactly one of these. Only the first two are
//! successful; the rest are item-local failures that never abort the run.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Termination {
    // ===== Success States =====
    /// The sentinel row was reached and scanning stopped
    SentinelReached,

    /// Every row was scanned without meeting the sentinel
    Exhausted,

    // ===== Error States =====
    /// The page did not become ready within the timeout
    TimedOut,

    /// A record row was malformed; records before it are kept
    RowDefect,

    /// The fetcher failed to open, load, or query the page
    FetcherFault,

    /// The worker task itself died (panic or abort)
    Aborted,
}

impl Termination {
    /// All termination reasons, in reporting order
    pub const ALL: [Termination; 6] = [
        Self::SentinelReached,
        Self::Exhausted,
        Self::TimedOut,
        Self::RowDefect,
        Self::FetcherFault,
        Self::Aborted,
    ];

    /// Returns true if the page was fully processed
    pub fn is_success(&self) -> bool {
        matches!(self, Self::SentinelReached | Self::Exhausted)
    }

    /// Returns true if this represents an item-local failure
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Short machine-readable name, used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SentinelReached => "sentinel_reached",
            Self::Exhausted => "exhausted",
            Self::TimedOut => "timed_out",
            Self::RowDefect => "row_defect",
            Self::FetcherFault => "fetcher_fault",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
