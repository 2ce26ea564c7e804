//! Crawler module for the fetch/parse pipeline
//!
//! This module contains the concurrent pipeline, including:
//! - HTTP fetching and outcome classification
//! - HTML tree building
//! - Fetch and parse units
//! - Overall coordination and the completion barrier

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_pipeline, Coordinator, RunSummary};
pub use fetcher::{
    build_http_client, fetch_url, run_fetch_unit, DocumentSource, FetchResult, FetchedDocument,
    HttpSource,
};
pub use parser::{parse_html, run_parse_unit, HtmlTreeBuilder, SharedReceiver, TreeBuilder};

use crate::config::Config;
use crate::TandemError;

/// Runs a complete pipeline over the configured batch
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client
/// 2. Launch one fetch unit and one parse unit per URL
/// 3. Log a report for each document that was fetched and parsed
/// 4. Wait for every unit to finish
///
/// # Arguments
///
/// * `config` - The pipeline configuration
///
/// # Returns
///
/// * `Ok(RunSummary)` - Every unit completed
/// * `Err(TandemError)` - The HTTP client could not be built
pub async fn crawl(config: Config) -> Result<RunSummary, TandemError> {
    run_pipeline(config).await
}
