//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the run-level flow:
//! - Discovering seed titles on the listing page
//! - Handing them to the scheduler
//! - Flattening finished item reports into the result set
//! - Writing the result set once and summarizing the run

use crate::config::Config;
use crate::crawler::discovery::discover_seeds;
use crate::crawler::extractor::RowExtractor;
use crate::crawler::fetcher::HttpFetcher;
use crate::crawler::page::PageFetcher;
use crate::crawler::scheduler::Scheduler;
use crate::output::{CrawlSummary, CsvSink, RecordSink};
use crate::record::ResultSet;
use crate::CrawlError;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Everything one run produced
#[derive(Debug)]
pub struct CrawlReport {
    pub results: ResultSet,
    pub summary: CrawlSummary,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
}

impl Coordinator {
    /// Creates a coordinator backed by the HTTP fetcher
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::new(&config.fetcher)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Creates a coordinator around any page fetcher
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    /// Runs discovery and all item workers
    ///
    /// Never fails: a listing page that yields no seeds is logged and gives
    /// an empty result set; item failures only shrink the result set.
    pub async fn run(&self) -> CrawlReport {
        let started_at = Utc::now();
        let crawler = &self.config.crawler;
        let ready_timeout = Duration::from_millis(crawler.ready_timeout_ms);

        let mut seeds = match self.discover(ready_timeout).await {
            Ok(seeds) => seeds,
            Err(e) => {
                tracing::error!(url = %crawler.seed_page_url, error = %e, "Seed discovery failed");
                return CrawlReport {
                    results: ResultSet::new(),
                    summary: CrawlSummary::discovery_failed(started_at, e.to_string()),
                };
            }
        };
        let discovered = seeds.len();

        let limit = crawler.max_items;
        if limit > 0 && discovered > limit {
            tracing::info!(discovered, limit, "Limiting crawl to the first titles");
            seeds.truncate(limit);
        }
        let scheduled = seeds.len();

        let scheduler = Scheduler::new(
            Arc::clone(&self.fetcher),
            RowExtractor::new(&self.config.selectors),
            &self.config.selectors.cast_row,
            crawler.max_concurrent_pages_open as usize,
            ready_timeout,
            &crawler.detail_path_suffix,
        );

        tracing::info!(
            items = scheduled,
            max_concurrent = crawler.max_concurrent_pages_open,
            "Fetching cast lists"
        );
        let outcome = scheduler.run(seeds).await;

        let summary =
            CrawlSummary::from_reports(started_at, discovered, scheduled, &outcome.reports);
        let mut results = ResultSet::new();
        for report in outcome.reports {
            results.append_item(report.records);
        }

        CrawlReport { results, summary }
    }

    async fn discover(&self, ready_timeout: Duration) -> Result<Vec<Url>, CrawlError> {
        let seed_page = Url::parse(&self.config.crawler.seed_page_url)?;
        discover_seeds(
            self.fetcher.as_ref(),
            &seed_page,
            &self.config.selectors,
            ready_timeout,
        )
        .await
    }
}

/// Runs a crawl and writes its records to `sink`
///
/// The sink is written exactly once, after every item has finished.
pub async fn run_crawl_into(
    coordinator: &Coordinator,
    sink: &mut dyn RecordSink,
) -> Result<CrawlSummary, CrawlError> {
    let report = coordinator.run().await;

    sink.write_records(report.results.records())?;
    tracing::info!(
        records = report.results.len(),
        "Parsing completed. Results saved to {}",
        sink.describe()
    );

    report.summary.log();
    Ok(report.summary)
}

/// Runs the main crawl operation
///
/// This function orchestrates the entire crawl process:
///
/// 1. Build the HTTP fetcher
/// 2. Discover seed titles on the listing page
/// 3. Fetch every detail page under the concurrency limit
/// 4. Extract cast rows up to the sentinel
/// 5. Write all records to the configured CSV file
/// 6. Log the run summary
///
/// # Example
///
/// ```no_run
/// use cast_harvest::config::load_config;
/// use cast_harvest::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// run_crawl(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlSummary, CrawlError> {
    let mut sink = CsvSink::new(&config.output.csv_path);
    let coordinator = Coordinator::new(config)?;
    run_crawl_into(&coordinator, &mut sink).await
}
