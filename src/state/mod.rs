//! State module for tracking per-unit outcomes
//!
//! Every fetch unit ends in exactly one [`DocumentState`] and every parse unit
//! in exactly one [`ParseOutcome`]. The coordinator folds both into
//! [`RunStatistics`](crate::output::RunStatistics).

mod document_state;

pub use document_state::{DocumentState, ParseOutcome};
