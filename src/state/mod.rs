//! State module for tracking extraction progress
//!
//! # Components
//!
//! - `ExtractorState`: the two-state machine driving row scanning on a detail page
//! - `Termination`: why work on one item ended

mod extractor_state;
mod termination;

// Re-export main types
pub use extractor_state::ExtractorState;
pub use termination::Termination;
