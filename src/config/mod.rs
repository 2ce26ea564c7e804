//! Configuration module for Tandem-Scrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file section falls back to its default,
//! and a missing file altogether means [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use tandem_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Batch size: {}", config.pipeline.urls.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, PipelineConfig, ReportConfig, UserAgentConfig, DEFAULT_URLS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
