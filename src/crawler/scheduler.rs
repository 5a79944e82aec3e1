//! Scheduler for fanning out item workers
//!
//! This module handles:
//! - Deriving the detail page URL of every seed
//! - Spawning one worker task per seed, all at once
//! - Global concurrency limiting via a shared semaphore
//! - Collecting reports in completion order without fail-fast

use crate::crawler::extractor::RowExtractor;
use crate::crawler::page::PageFetcher;
use crate::crawler::worker::{ItemReport, ItemWorker};
use crate::url::derive_detail_url;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Reports of all items that ran to completion
#[derive(Debug, Default)]
pub struct ScheduleOutcome {
    /// One report per finished worker, in completion order
    pub reports: Vec<ItemReport>,

    /// Worker tasks that died without reporting (panic)
    pub aborted: usize,
}

/// Scheduler runs item workers under a global concurrency limit
///
/// All tasks are created immediately; at most `max_concurrent` of them hold
/// an open page at any time. One item's failure never cancels another.
pub struct Scheduler {
    /// Global semaphore for limiting concurrently open pages
    global_semaphore: Arc<Semaphore>,

    worker: Arc<ItemWorker>,

    detail_path_suffix: String,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Page fetcher shared by all workers
    /// * `extractor` - Row extractor applied to every detail page
    /// * `row_selector` - Selector for the cast table rows
    /// * `max_concurrent` - Maximum number of pages open at once
    /// * `ready_timeout` - Upper bound on waiting for one page
    /// * `detail_path_suffix` - Suffix turning a seed URL into a detail URL
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: RowExtractor,
        row_selector: &str,
        max_concurrent: usize,
        ready_timeout: Duration,
        detail_path_suffix: &str,
    ) -> Self {
        let global_semaphore = Arc::new(Semaphore::new(max_concurrent));
        let worker = ItemWorker::new(
            fetcher,
            extractor,
            row_selector,
            ready_timeout,
            Arc::clone(&global_semaphore),
        );

        Self {
            global_semaphore,
            worker: Arc::new(worker),
            detail_path_suffix: detail_path_suffix.to_string(),
        }
    }

    /// Number of workers that may start fetching right now
    pub fn available_slots(&self) -> usize {
        self.global_semaphore.available_permits()
    }

    /// Runs one worker per seed and waits for all of them
    ///
    /// Duplicate seeds are processed as separate items.
    pub async fn run(&self, seeds: Vec<Url>) -> ScheduleOutcome {
        let total = seeds.len();
        let mut tasks = JoinSet::new();

        for seed in seeds {
            let detail = derive_detail_url(&seed, &self.detail_path_suffix);
            let worker = Arc::clone(&self.worker);
            tasks.spawn(async move { worker.fetch_and_extract(seed, detail).await });
        }

        tracing::debug!(tasks = total, "Spawned item workers");

        let mut outcome = ScheduleOutcome::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(report) => outcome.reports.push(report),
                Err(e) => {
                    tracing::error!(error = %e, "Item worker task failed");
                    outcome.aborted += 1;
                }
            }

            let done = outcome.reports.len() + outcome.aborted;
            if done % 10 == 0 || done == total {
                tracing::info!("Progress: {} / {} items finished", done, total);
            }
        }

        outcome
    }
}
