//! Item worker: fetches one detail page and extracts its cast
//!
//! A worker holds one unit of the shared concurrency budget for as long as
//! its page is open. The page is closed on every path out of the worker, and
//! every failure is folded into the returned `ItemReport` instead of being
//! propagated.

use crate::crawler::extractor::RowExtractor;
use crate::crawler::page::{Page, PageFetcher, Readiness};
use crate::record::Actor;
use crate::state::Termination;
use crate::{CrawlError, FetchError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// Everything a finished item contributes to the run
#[derive(Debug)]
pub struct ItemReport {
    pub seed_url: Url,
    pub detail_url: Url,
    pub records: Vec<Actor>,
    pub rows_scanned: usize,
    pub termination: Termination,
    pub error: Option<CrawlError>,
}

/// Work done while the page was open
struct PageOutcome {
    records: Vec<Actor>,
    rows_scanned: usize,
    termination: Termination,
    error: Option<CrawlError>,
}

impl PageOutcome {
    fn failed(termination: Termination, error: CrawlError) -> Self {
        Self {
            records: Vec::new(),
            rows_scanned: 0,
            termination,
            error: Some(error),
        }
    }
}

/// Fetches detail pages under the shared concurrency budget
pub struct ItemWorker {
    fetcher: Arc<dyn PageFetcher>,
    extractor: RowExtractor,
    row_selector: String,
    ready_timeout: Duration,
    budget: Arc<Semaphore>,
}

impl ItemWorker {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: RowExtractor,
        row_selector: impl Into<String>,
        ready_timeout: Duration,
        budget: Arc<Semaphore>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            row_selector: row_selector.into(),
            ready_timeout,
            budget,
        }
    }

    /// Fetches `detail_url` and extracts its records
    ///
    /// Never fails: timeouts, fetcher faults, and malformed rows end up in the
    /// report's `termination` and `error`. A malformed row keeps the records
    /// extracted before it; the other failures yield no records.
    pub async fn fetch_and_extract(&self, seed_url: Url, detail_url: Url) -> ItemReport {
        let outcome = match Arc::clone(&self.budget).acquire_owned().await {
            Ok(_permit) => self.visit(&detail_url).await,
            Err(_) => PageOutcome::failed(
                Termination::Aborted,
                CrawlError::FetcherFault(FetchError::Task {
                    url: detail_url.to_string(),
                    message: "concurrency budget closed".to_string(),
                }),
            ),
        };

        match &outcome.error {
            None => tracing::info!(
                url = %detail_url,
                rows = outcome.rows_scanned,
                records = outcome.records.len(),
                termination = %outcome.termination,
                "Fetched cast"
            ),
            Some(e) => tracing::error!(
                url = %detail_url,
                rows = outcome.rows_scanned,
                records = outcome.records.len(),
                termination = %outcome.termination,
                error = %e,
                "Cast fetch ended early"
            ),
        }

        ItemReport {
            seed_url,
            detail_url,
            records: outcome.records,
            rows_scanned: outcome.rows_scanned,
            termination: outcome.termination,
            error: outcome.error,
        }
    }

    /// Opens, scrapes, and closes the page; the caller holds the permit
    async fn visit(&self, detail_url: &Url) -> PageOutcome {
        tracing::info!(url = %detail_url, "Fetching cast for title");

        let mut page = match self.fetcher.open(detail_url).await {
            Ok(page) => page,
            Err(e) => return PageOutcome::failed(Termination::FetcherFault, e.into()),
        };

        let outcome = self.scrape(page.as_mut()).await;
        page.close().await;
        outcome
    }

    async fn scrape(&self, page: &mut dyn Page) -> PageOutcome {
        let readiness = page.wait_ready(self.ready_timeout).await;
        match readiness {
            Ok(Readiness::Ready) => self.extract(page),
            Ok(Readiness::TimedOut) => PageOutcome::failed(
                Termination::TimedOut,
                CrawlError::ItemTimeout {
                    url: page.url().to_string(),
                    timeout_ms: self.ready_timeout.as_millis() as u64,
                },
            ),
            Err(e) => PageOutcome::failed(Termination::FetcherFault, e.into()),
        }
    }

    fn extract(&self, page: &dyn Page) -> PageOutcome {
        let document = match page.document() {
            Ok(document) => document,
            Err(e) => return PageOutcome::failed(Termination::FetcherFault, e.into()),
        };
        let rows = match document.query_all(&self.row_selector) {
            Ok(rows) => rows,
            Err(e) => return PageOutcome::failed(Termination::FetcherFault, e.into()),
        };
        tracing::debug!(url = %page.url(), rows = rows.len(), "Cast table loaded");

        let extraction = self.extractor.extract(&rows, page.url());
        let termination = extraction.termination();
        let error = extraction
            .defect
            .map(|defect| CrawlError::RowExtractionDefect {
                url: page.url().to_string(),
                row: defect.row,
                message: defect.message,
            });

        PageOutcome {
            records: extraction.records,
            rows_scanned: extraction.rows_scanned,
            termination,
            error,
        }
    }
}
