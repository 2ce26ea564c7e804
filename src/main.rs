//! Tandem-Scrape main entry point
//!
//! This is the command-line interface for the Tandem-Scrape pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tandem_scrape::config::{load_config_with_hash, validate, Config};
use tandem_scrape::crawler::crawl;
use tracing_subscriber::EnvFilter;

/// Tandem-Scrape: fetch a batch of pages concurrently and extract links and text
///
/// Each URL gets one fetch worker and one parse worker. Fetched bodies pass
/// through a bounded channel to whichever parse worker is free, and every
/// parsed page is logged as a report of its links and visible text.
#[derive(Parser, Debug)]
#[command(name = "tandem-scrape")]
#[command(version)]
#[command(about = "Concurrent link and text extraction", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in batch if omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// URL to process; repeat to build the batch (replaces the configured URLs)
    #[arg(long = "url", value_name = "URL")]
    urls: Vec<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be fetched without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in batch");
            Config::default()
        }
    };

    if !cli.urls.is_empty() {
        config.pipeline.urls = cli.urls.clone();
    }
    validate(&config).context("invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_run(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tandem_scrape=info,warn"),
            1 => EnvFilter::new("tandem_scrape=debug,info"),
            2 => EnvFilter::new("tandem_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the batch and settings
fn handle_dry_run(config: &Config) {
    println!("=== Tandem-Scrape Dry Run ===\n");

    println!("Batch ({} URLs):", config.pipeline.urls.len());
    for url in &config.pipeline.urls {
        println!("  - {}", url);
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nHTTP:");
    println!("  Request timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nReport:");
    println!("  Text preview length: {} chars", config.report.preview_length);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would launch {} fetch units and {} parse units",
        config.pipeline.urls.len(),
        config.pipeline.urls.len()
    );
}

/// Handles the main pipeline run
async fn handle_run(config: Config) -> Result<()> {
    tracing::info!("Processing {} URLs", config.pipeline.urls.len());

    let summary = crawl(config).await.context("pipeline failed to start")?;
    summary.statistics.log();

    Ok(())
}
