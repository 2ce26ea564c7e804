//! Link and text extraction
//!
//! This module owns the document tree model and the walk that turns a tree
//! into an [`Extraction`]:
//! - `<a href>` targets, in document order, duplicates kept
//! - visible text, trimmed per fragment and joined with single spaces
//!
//! `script` and `style` subtrees are never entered.

mod tree;
mod walk;

pub use tree::{DocumentTree, Element, Node};
pub use walk::{extract, Extraction};
