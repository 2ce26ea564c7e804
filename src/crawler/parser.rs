//! HTML tree building and the parse unit
//!
//! This module covers the consumer side of the pipeline:
//! - The [`TreeBuilder`] capability and its scraper-backed implementation
//! - The parse unit, which takes one document from the shared pool,
//!   extracts links and text, and logs a report

use crate::crawler::fetcher::FetchedDocument;
use crate::extract::{extract, DocumentTree, Element, Node};
use crate::output::PageReport;
use crate::state::ParseOutcome;
use crate::TreeError;
use scraper::{ElementRef, Html, Node as HtmlNode};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Receiving end of the handoff channel, shared by every parse unit
pub type SharedReceiver = Arc<Mutex<mpsc::Receiver<FetchedDocument>>>;

/// Capability that turns a raw body into a document tree
pub trait TreeBuilder: Send + Sync {
    fn build(&self, body: &[u8]) -> Result<DocumentTree, TreeError>;
}

/// Number of leading bytes inspected when deciding whether a body is markup
pub const SNIFF_LENGTH: usize = 1024;

/// [`TreeBuilder`] backed by scraper's HTML5 parser
///
/// Bodies that are not valid UTF-8 are decoded lossily. A NUL byte within
/// the first [`SNIFF_LENGTH`] bytes marks the body as binary, which is the
/// one thing this builder rejects. Markup errors never fail; the parser
/// recovers the same way a browser does. Comments, doctypes, and processing
/// instructions are dropped from the tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTreeBuilder;

impl TreeBuilder for HtmlTreeBuilder {
    fn build(&self, body: &[u8]) -> Result<DocumentTree, TreeError> {
        let sniffed = &body[..body.len().min(SNIFF_LENGTH)];
        if let Some(offset) = sniffed.iter().position(|&byte| byte == 0) {
            return Err(TreeError::Binary { offset });
        }

        let html = String::from_utf8_lossy(body);
        Ok(parse_html(&html))
    }
}

/// Parses an HTML document into a [`DocumentTree`] rooted at `<html>`
///
/// # Example
///
/// ```
/// use tandem_scrape::crawler::parse_html;
/// use tandem_scrape::extract::extract;
///
/// let tree = parse_html(r#"<p>Hello <a href="/x">there</a></p>"#);
/// assert_eq!(extract(&tree).text, "Hello there");
/// ```
pub fn parse_html(html: &str) -> DocumentTree {
    let document = Html::parse_document(html);
    DocumentTree::new(convert_element(document.root_element()))
}

fn shallow_copy(element: ElementRef<'_>) -> Element {
    let value = element.value();
    let mut converted = Element::new(value.name());
    converted.attrs = value
        .attrs()
        .map(|(name, attr_value)| (name.to_string(), attr_value.to_string()))
        .collect();
    converted
}

/// Converts a scraper subtree into an owned [`Element`]
///
/// Walks with an explicit stack of open elements, so nesting depth is
/// bounded by memory rather than by the worker's call stack.
fn convert_element(root: ElementRef<'_>) -> Element {
    let mut open = vec![(shallow_copy(root), root.children())];

    while let Some((current, children)) = open.last_mut() {
        if let Some(child) = children.next() {
            if let Some(child_element) = ElementRef::wrap(child) {
                open.push((shallow_copy(child_element), child_element.children()));
            } else if let HtmlNode::Text(text) = child.value() {
                current.children.push(Node::Text(String::from(&**text)));
            }
            continue;
        }

        let Some((finished, _)) = open.pop() else {
            break;
        };
        match open.last_mut() {
            Some((parent, _)) => parent.children.push(Node::Element(finished)),
            None => return finished,
        }
    }

    // The loop always returns once the root is closed
    shallow_copy(root)
}

/// Runs one parse unit to completion
///
/// Waits for a single document from the shared pool. If the channel closes
/// before one arrives (every fetch unit finished and the pool is drained),
/// the unit exits as [`ParseOutcome::Idle`] instead of waiting forever.
pub async fn run_parse_unit(
    id: usize,
    receiver: SharedReceiver,
    builder: Arc<dyn TreeBuilder>,
    preview_length: usize,
) -> ParseOutcome {
    let received = {
        let mut receiver = receiver.lock().await;
        receiver.recv().await
    };

    let Some(FetchedDocument { url, body }) = received else {
        tracing::debug!("Parser {} idle: no documents left", id);
        return ParseOutcome::Idle;
    };

    tracing::debug!("Parser {} received {} ({} bytes)", id, url, body.len());

    let tree = match builder.build(&body) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::warn!("Parser {} failed to parse {}: {}", id, url, e);
            return ParseOutcome::TreeFailed { url };
        }
    };

    let report = PageReport::new(id, url, extract(&tree));
    report.log(preview_length);
    ParseOutcome::Reported(report)
}
