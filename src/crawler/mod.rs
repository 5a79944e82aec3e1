//! Crawler module for page fetching and cast extraction
//!
//! This module contains the core crawling logic, including:
//! - The page fetcher capability and its HTTP implementation
//! - Seed discovery on the listing page
//! - Cast row extraction up to the sentinel
//! - Bounded-concurrency scheduling of item workers
//! - Overall crawl coordination

mod coordinator;
mod discovery;
mod extractor;
mod fetcher;
mod page;
mod parser;
mod scheduler;
mod worker;

#[cfg(test)]
mod testing;

pub use coordinator::{run_crawl, run_crawl_into, Coordinator, CrawlReport};
pub use discovery::discover_seeds;
pub use extractor::{Extraction, RowDefect, RowExtractor};
pub use fetcher::{build_http_client, HttpFetcher, HttpPage};
pub use page::{Document, Element, Page, PageFetcher, Readiness};
pub use parser::{HtmlDocument, HtmlElement};
pub use scheduler::{ScheduleOutcome, Scheduler};
pub use worker::{ItemReport, ItemWorker};

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP fetcher
/// 2. Discover the listed titles
/// 3. Fetch and extract every cast list under the concurrency limit
/// 4. Write the flattened records to CSV
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed and results were written
/// * `Err(CrawlError)` - The client could not be built or output failed
pub async fn crawl(config: Config) -> Result<CrawlSummary, CrawlError> {
    run_crawl(config).await
}
