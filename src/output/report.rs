//! Per-document report formatting

use crate::extract::Extraction;

/// Appended to text previews that were cut short
pub const TRUNCATION_MARKER: &str = "...";

const BANNER_RULE: &str = "-------------------";
const FOOTER_RULE: &str = "-----------------------------------------------------------";

/// Report for one successfully parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// Index of the parse unit that produced this report
    pub parser_id: usize,

    /// Source URL of the document
    pub url: String,

    /// Extracted link targets in document order
    pub links: Vec<String>,

    /// Full normalized text
    pub text: String,
}

impl PageReport {
    pub fn new(parser_id: usize, url: String, extraction: Extraction) -> Self {
        Self {
            parser_id,
            url,
            links: extraction.links,
            text: extraction.text,
        }
    }

    /// Renders the report as log lines
    ///
    /// Text longer than `preview_length` characters is cut to exactly that
    /// many characters and followed by [`TRUNCATION_MARKER`].
    pub fn lines(&self, preview_length: usize) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.links.len() + 5);

        lines.push(format!(
            "{} PARSED DATA (Parser {}) {}",
            BANNER_RULE, self.parser_id, BANNER_RULE
        ));
        lines.push(format!("URL: {}", self.url));
        lines.push(format!("  Extracted Links ({}):", self.links.len()));
        for link in &self.links {
            lines.push(format!("    - {}", link));
        }

        match truncate_preview(&self.text, preview_length) {
            Some(preview) => lines.push(format!(
                "  Extracted Text (Preview - first {} chars): {}{}",
                preview_length, preview, TRUNCATION_MARKER
            )),
            None => lines.push(format!("  Extracted Text: {}", self.text)),
        }

        lines.push(FOOTER_RULE.to_string());
        lines
    }

    /// Writes the report to the log, one event per line
    pub fn log(&self, preview_length: usize) {
        for line in self.lines(preview_length) {
            tracing::info!("{}", line);
        }
    }
}

/// Returns the first `limit` characters of `text` if it is longer than that
///
/// Counts characters rather than bytes so a multi-byte code point is never split.
pub fn truncate_preview(text: &str, limit: usize) -> Option<&str> {
    text.char_indices().nth(limit).map(|(idx, _)| &text[..idx])
}
