//! Cast-Harvest main entry point
//!
//! This is the command-line interface for the Cast-Harvest cast list crawler.

use anyhow::Context;
use cast_harvest::config::{load_config_with_hash, validate, Config};
use cast_harvest::crawler::crawl;
use cast_harvest::output::print_summary;
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Cast-Harvest: a bounded-concurrency cast list crawler
///
/// Cast-Harvest reads a ranked title listing, visits the full-credits page of
/// every listed title, and writes the principal cast of each one to a single
/// CSV file.
#[derive(Parser, Debug)]
#[command(name = "cast-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A bounded-concurrency cast list crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults without one)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of detail pages open at once
    #[arg(short, long, value_name = "N")]
    concurrency: Option<u32>,

    /// CSV file to write the records to
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Only crawl the first N listed titles
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Also write log lines to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid command-line overrides")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// With a log file, events go to both stderr and the file; the file is
/// truncated and gets no ANSI colors.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cast_harvest=info,warn"),
            1 => EnvFilter::new("cast_harvest=debug,info"),
            2 => EnvFilter::new("cast_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false),
        )
        .with(file_layer)
        .init();

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_pages_open = concurrency;
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.clone();
    }
    if let Some(limit) = cli.limit {
        config.crawler.max_items = limit;
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Cast-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed page: {}", config.crawler.seed_page_url);
    println!(
        "  Max concurrent pages: {}",
        config.crawler.max_concurrent_pages_open
    );
    println!("  Ready timeout: {}ms", config.crawler.ready_timeout_ms);
    println!("  Detail path suffix: {}", config.crawler.detail_path_suffix);
    if config.crawler.max_items > 0 {
        println!("  Title limit: {}", config.crawler.max_items);
    } else {
        println!("  Title limit: none");
    }

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Connect timeout: {}ms", config.fetcher.connect_timeout_ms);

    println!("\nSelectors:");
    println!("  Listing item: {}", config.selectors.listing_item);
    println!("  Listing link: {}", config.selectors.listing_link);
    println!("  Cast row: {}", config.selectors.cast_row);
    println!("  Role marker: {}", config.selectors.role_marker);
    println!("  Name cell: {}", config.selectors.name_cell);
    println!("  Profile link: {}", config.selectors.profile_link);
    println!("  Sentinel: {:?}", config.selectors.sentinel);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, quiet: bool) -> anyhow::Result<()> {
    let csv_path = config.output.csv_path.clone();
    tracing::info!(
        seed_page = %config.crawler.seed_page_url,
        max_concurrent = config.crawler.max_concurrent_pages_open,
        "Starting crawl"
    );

    let summary = crawl(config)
        .await
        .with_context(|| format!("crawl failed, results not written to {}", csv_path))?;

    if !quiet {
        print_summary(&summary);
    }

    Ok(())
}
