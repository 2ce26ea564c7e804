//! Pipeline coordinator
//!
//! This module wires the fetch and parse units together:
//! - One fetch unit and one parse unit per URL in the batch
//! - A single bounded handoff channel sized to the batch
//! - A completion barrier over all launched units
//!
//! Parse units share one receiver, so any parse unit may pick up any
//! document. The coordinator holds no sender of its own once the fetch
//! units are launched, which lets the channel close as soon as the last
//! fetch unit finishes; surplus parse units then exit instead of waiting
//! forever.

use crate::config::Config;
use crate::crawler::fetcher::{run_fetch_unit, DocumentSource, HttpSource};
use crate::crawler::parser::{run_parse_unit, HtmlTreeBuilder, SharedReceiver, TreeBuilder};
use crate::output::{PageReport, RunStatistics};
use crate::state::{DocumentState, ParseOutcome};
use crate::TandemError;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Reports in completion order
    pub reports: Vec<PageReport>,

    /// Outcome counts for every unit
    pub statistics: RunStatistics,
}

/// What a single unit returned to the barrier
enum UnitResult {
    Fetch(DocumentState),
    Parse(ParseOutcome),
}

/// Main pipeline coordinator structure
pub struct Coordinator {
    urls: Vec<String>,
    preview_length: usize,
    source: Arc<dyn DocumentSource>,
    builder: Arc<dyn TreeBuilder>,
}

impl Coordinator {
    /// Creates a coordinator that fetches over HTTP and parses HTML
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(TandemError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, TandemError> {
        let source = HttpSource::from_config(&config)?;
        Ok(Self::with_capabilities(
            config,
            Arc::new(source),
            Arc::new(HtmlTreeBuilder),
        ))
    }

    /// Creates a coordinator with caller-supplied fetch and tree capabilities
    pub fn with_capabilities(
        config: Config,
        source: Arc<dyn DocumentSource>,
        builder: Arc<dyn TreeBuilder>,
    ) -> Self {
        Self {
            urls: config.pipeline.urls,
            preview_length: config.report.preview_length,
            source,
            builder,
        }
    }

    /// Number of URLs, and so of fetch units and of parse units
    pub fn batch_size(&self) -> usize {
        self.urls.len()
    }

    /// Runs the batch and blocks until every unit has completed
    ///
    /// Per-document failures never abort the run; they are logged by the
    /// unit that hit them and counted in the returned statistics.
    pub async fn run(&self) -> RunSummary {
        let batch_size = self.batch_size();
        let mut statistics = RunStatistics::new(batch_size);

        tracing::info!(
            "Starting pipeline: {} fetch units, {} parse units",
            batch_size,
            batch_size
        );

        // tokio rejects a zero-capacity channel
        let (sender, receiver) = mpsc::channel(batch_size.max(1));
        let receiver: SharedReceiver = Arc::new(Mutex::new(receiver));

        let mut units = JoinSet::new();

        for (id, url) in self.urls.iter().enumerate() {
            let source = Arc::clone(&self.source);
            let sender = sender.clone();
            let url = url.clone();
            units.spawn(async move {
                UnitResult::Fetch(run_fetch_unit(id, url, source, sender).await)
            });
        }

        // Only fetch units hold senders from here on
        drop(sender);

        for id in 0..batch_size {
            let receiver = Arc::clone(&receiver);
            let builder = Arc::clone(&self.builder);
            let preview_length = self.preview_length;
            units.spawn(async move {
                UnitResult::Parse(run_parse_unit(id, receiver, builder, preview_length).await)
            });
        }

        let mut reports = Vec::new();
        while let Some(joined) = units.join_next().await {
            match joined {
                Ok(UnitResult::Fetch(state)) => {
                    tracing::debug!("Fetch unit finished: {}", state);
                    statistics.record_fetch(state);
                }
                Ok(UnitResult::Parse(outcome)) => {
                    statistics.record_parse(&outcome);
                    if let Some(report) = outcome.into_report() {
                        reports.push(report);
                    }
                }
                Err(e) => {
                    tracing::error!("Pipeline unit failed: {}", e);
                    statistics.record_join_failure();
                }
            }
        }

        statistics.finish();
        tracing::info!(
            "Pipeline complete: {} of {} units finished, {} reports",
            statistics.completed_units(),
            batch_size * 2,
            reports.len()
        );

        RunSummary {
            reports,
            statistics,
        }
    }
}

/// Runs the whole batch described by `config` over HTTP
///
/// # Example
///
/// ```no_run
/// use tandem_scrape::config::Config;
/// use tandem_scrape::crawler::run_pipeline;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_pipeline(Config::default()).await?;
/// println!("{} reports", summary.reports.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_pipeline(config: Config) -> Result<RunSummary, TandemError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
