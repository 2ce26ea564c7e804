//! Output module for Tandem-Scrape
//!
//! Reports are diagnostic text written through `tracing`; nothing is
//! persisted. This module provides:
//! - [`PageReport`]: the per-document block (URL, links, text preview)
//! - [`RunStatistics`]: counts of every unit outcome for one run

mod report;
mod stats;

pub use report::{truncate_preview, PageReport, TRUNCATION_MARKER};
pub use stats::RunStatistics;
