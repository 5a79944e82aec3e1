//! URL handling module for Cast-Harvest
//!
//! This module provides detail page URL derivation and resolution of
//! links found on fetched pages.

mod derive;
mod resolve;

// Re-export main functions
pub use derive::derive_detail_url;
pub use resolve::resolve_href;
