//! Crawl summary statistics
//!
//! This module folds the item reports of a run into a summary that is
//! logged and printed once the run has finished.

use crate::crawler::ItemReport;
use crate::state::Termination;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Seeds found on the listing page
    pub seeds_discovered: usize,

    /// Seeds handed to the scheduler after the `max-items` limit
    pub items_scheduled: usize,

    /// Total number of records extracted
    pub total_records: usize,

    /// Count of items by how they ended
    pub items_by_termination: BTreeMap<Termination, usize>,

    /// Why discovery produced no seeds, if it did not
    pub discovery_error: Option<String>,
}

impl CrawlSummary {
    /// Builds a summary from the reports of a run
    ///
    /// Scheduled items without a report are counted as `Aborted`.
    pub fn from_reports(
        started_at: DateTime<Utc>,
        seeds_discovered: usize,
        items_scheduled: usize,
        reports: &[ItemReport],
    ) -> Self {
        let mut items_by_termination = BTreeMap::new();
        for report in reports {
            *items_by_termination.entry(report.termination).or_insert(0) += 1;
        }

        let missing = items_scheduled.saturating_sub(reports.len());
        if missing > 0 {
            *items_by_termination.entry(Termination::Aborted).or_insert(0) += missing;
        }

        Self {
            started_at,
            finished_at: Utc::now(),
            seeds_discovered,
            items_scheduled,
            total_records: reports.iter().map(|r| r.records.len()).sum(),
            items_by_termination,
            discovery_error: None,
        }
    }

    /// Summary of a run whose discovery failed
    pub fn discovery_failed(started_at: DateTime<Utc>, error: String) -> Self {
        Self {
            started_at,
            finished_at: Utc::now(),
            seeds_discovered: 0,
            items_scheduled: 0,
            total_records: 0,
            items_by_termination: BTreeMap::new(),
            discovery_error: Some(error),
        }
    }

    /// Number of items that ended with the given reason
    pub fn count(&self, termination: Termination) -> usize {
        self.items_by_termination
            .get(&termination)
            .copied()
            .unwrap_or(0)
    }

    /// Number of items processed without error
    pub fn succeeded(&self) -> usize {
        self.items_by_termination
            .iter()
            .filter(|(t, _)| t.is_success())
            .map(|(_, n)| n)
            .sum()
    }

    /// Number of items that failed
    pub fn failed(&self) -> usize {
        self.items_by_termination
            .iter()
            .filter(|(t, _)| t.is_error())
            .map(|(_, n)| n)
            .sum()
    }

    pub fn elapsed_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Emits the summary as one structured log event
    pub fn log(&self) {
        tracing::info!(
            seeds = self.seeds_discovered,
            scheduled = self.items_scheduled,
            succeeded = self.succeeded(),
            failed = self.failed(),
            records = self.total_records,
            sentinel_reached = self.count(Termination::SentinelReached),
            exhausted = self.count(Termination::Exhausted),
            timed_out = self.count(Termination::TimedOut),
            row_defects = self.count(Termination::RowDefect),
            fetcher_faults = self.count(Termination::FetcherFault),
            aborted = self.count(Termination::Aborted),
            "Crawl summary"
        );
        tracing::info!("Execution time: {:.1} min", self.elapsed_secs() / 60.0);
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");

    println!("Run:");
    println!("  Started:  {}", summary.started_at.to_rfc3339());
    println!("  Finished: {}", summary.finished_at.to_rfc3339());
    println!("  Elapsed:  {:.1} min", summary.elapsed_secs() / 60.0);
    println!();

    if let Some(error) = &summary.discovery_error {
        println!("Discovery failed: {}", error);
        println!();
    }

    println!("Overview:");
    println!("  Titles discovered: {}", summary.seeds_discovered);
    println!("  Titles crawled:    {}", summary.items_scheduled);
    println!("  Records extracted: {}", summary.total_records);
    println!();

    if !summary.items_by_termination.is_empty() {
        println!("Items by Termination:");
        for termination in Termination::ALL {
            let count = summary.count(termination);
            if count > 0 {
                println!("  {}: {}", termination, count);
            }
        }
        println!();
    }

    let success_rate = if summary.items_scheduled > 0 {
        (summary.succeeded() as f64 / summary.items_scheduled as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} titles fully processed)",
        success_rate,
        summary.succeeded(),
        summary.items_scheduled
    );
}
