//! Run statistics
//!
//! Tallies the terminal state of every fetch and parse unit so a run can be
//! summarized once the completion barrier is reached.

use crate::state::{DocumentState, ParseOutcome};
use chrono::{DateTime, Utc};

/// Counts of unit outcomes for one pipeline run
#[derive(Debug, Clone)]
pub struct RunStatistics {
    /// Number of URLs in the batch
    pub total_urls: usize,

    /// Fetch units that reached a terminal state
    pub fetch_units: usize,

    /// Parse units that reached a terminal state
    pub parse_units: usize,

    /// Documents handed to the parse pool
    pub fetched: usize,

    /// Responses dropped for a non-success status
    pub filtered: usize,

    /// Transport failures
    pub unreachable: usize,

    /// Body reads that failed after a success status
    pub body_read_failed: usize,

    /// Documents fetched with nobody left to receive them
    pub undelivered: usize,

    /// Reports produced
    pub reports: usize,

    /// Documents whose tree could not be built
    pub tree_failed: usize,

    /// Parse units that exited without receiving a document
    pub idle_parsers: usize,

    /// Units that panicked or were cancelled
    pub join_failures: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunStatistics {
    /// Starts a new tally for a batch of `total_urls`
    pub fn new(total_urls: usize) -> Self {
        Self {
            total_urls,
            fetch_units: 0,
            parse_units: 0,
            fetched: 0,
            filtered: 0,
            unreachable: 0,
            body_read_failed: 0,
            undelivered: 0,
            reports: 0,
            tree_failed: 0,
            idle_parsers: 0,
            join_failures: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record_fetch(&mut self, state: DocumentState) {
        self.fetch_units += 1;
        match state {
            DocumentState::Fetched => self.fetched += 1,
            DocumentState::Filtered { .. } => self.filtered += 1,
            DocumentState::Unreachable => self.unreachable += 1,
            DocumentState::BodyReadFailed => self.body_read_failed += 1,
            DocumentState::Undelivered => self.undelivered += 1,
        }
    }

    pub fn record_parse(&mut self, outcome: &ParseOutcome) {
        self.parse_units += 1;
        match outcome {
            ParseOutcome::Reported(_) => self.reports += 1,
            ParseOutcome::TreeFailed { .. } => self.tree_failed += 1,
            ParseOutcome::Idle => self.idle_parsers += 1,
        }
    }

    pub fn record_join_failure(&mut self) {
        self.join_failures += 1;
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration of the run, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }

    /// Total units that signalled completion, including failed joins
    pub fn completed_units(&self) -> usize {
        self.fetch_units + self.parse_units + self.join_failures
    }

    /// Writes a summary block to the log
    pub fn log(&self) {
        tracing::info!("=== Run Statistics ===");
        tracing::info!("  URLs in batch: {}", self.total_urls);
        tracing::info!(
            "  Units completed: {} fetch, {} parse",
            self.fetch_units,
            self.parse_units
        );
        tracing::info!(
            "  Fetch: {} fetched, {} filtered, {} unreachable, {} body errors, {} undelivered",
            self.fetched,
            self.filtered,
            self.unreachable,
            self.body_read_failed,
            self.undelivered
        );
        tracing::info!(
            "  Parse: {} reported, {} tree errors, {} idle",
            self.reports,
            self.tree_failed,
            self.idle_parsers
        );
        if self.join_failures > 0 {
            tracing::warn!("  Worker failures: {}", self.join_failures);
        }
        if let Some(duration) = self.duration() {
            tracing::info!("  Duration: {}ms", duration.num_milliseconds());
        }
    }
}
