//! Configuration module for Cast-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; missing keys fall back to the defaults for the
//! IMDb Top 250 listing.
//!
//! # Example
//!
//! ```no_run
//! use cast_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Pages open at once: {}", config.crawler.max_concurrent_pages_open);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FetcherConfig, OutputConfig, SelectorConfig, DEFAULT_DETAIL_PATH_SUFFIX,
    DEFAULT_SEED_PAGE_URL, DEFAULT_SENTINEL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
