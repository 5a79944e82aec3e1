//! Cast-Harvest: a bounded-concurrency cast list crawler
//!
//! This crate crawls a ranked listing page, derives the full-credits page of
//! every listed title, and extracts the principal cast table of each one,
//! stopping at the "Rest of cast" marker. Results from all titles are
//! flattened into a single CSV file.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Cast-Harvest operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No listing entries found on {url}")]
    DiscoveryEmpty { url: String },

    #[error("Page did not become ready within {timeout_ms}ms: {url}")]
    ItemTimeout { url: String, timeout_ms: u64 },

    #[error("Malformed row {row} on {url}: {message}")]
    RowExtractionDefect {
        url: String,
        row: usize,
        message: String,
    },

    #[error("Fetcher fault: {0}")]
    FetcherFault(#[from] FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Errors raised by a page fetcher or its document handles
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Page {url} was queried before it became ready")]
    NotReady { url: String },

    #[error("Fetch task for {url} ended abnormally: {message}")]
    Task { url: String, message: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Result type alias for Cast-Harvest operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetcher operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use record::{Actor, ResultSet};
pub use state::{ExtractorState, Termination};
pub use url::derive_detail_url;
