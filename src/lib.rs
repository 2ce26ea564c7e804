//! Tandem-Scrape: a concurrent fetch-then-parse pipeline
//!
//! This crate fetches a fixed batch of documents concurrently, hands each body
//! to a pool of parse workers over a bounded channel, and extracts hyperlinks
//! and visible text from every document that arrives.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Tandem-Scrape operations
#[derive(Debug, Error)]
pub enum TandemError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while turning a fetched body into a document tree
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Body looks binary (NUL byte at offset {offset})")]
    Binary { offset: usize },
}

/// Result type alias for Tandem-Scrape operations
pub type Result<T> = std::result::Result<T, TandemError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, FetchedDocument, RunSummary};
pub use extract::{extract, DocumentTree, Extraction, Node};
pub use output::{PageReport, RunStatistics};
pub use state::{DocumentState, ParseOutcome};
