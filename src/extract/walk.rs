use crate::extract::tree::{DocumentTree, Element, Node};

/// Tags whose subtrees contribute neither links nor text
const SKIPPED_TAGS: [&str; 2] = ["script", "style"];

/// Links and normalized text pulled from one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// `href` targets in document order; duplicates are kept
    pub links: Vec<String>,

    /// Trimmed text fragments joined by single spaces
    pub text: String,
}

impl Extraction {
    fn push_text(&mut self, fragment: &str) {
        let trimmed = fragment.trim();
        if trimmed.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(trimmed);
    }
}

/// Extracts links and visible text from a document tree
///
/// # Walk Rules
///
/// Nodes are visited depth-first in document (pre-)order:
///
/// | Node | Action |
/// |------|--------|
/// | Text | Trim; append if non-empty |
/// | `<a>` | Record the first `href` value, then visit children |
/// | `<script>`, `<style>` | Stop; children are not visited |
/// | Other element | Visit children left to right |
///
/// An anchor's own `href` is recorded before the skip check, so the skip
/// only affects what lies beneath a node.
///
/// # Example
///
/// ```
/// use tandem_scrape::extract::{extract, DocumentTree, Element, Node};
///
/// let tree = DocumentTree::new(
///     Element::new("p")
///         .with_child(Node::text("Hello "))
///         .with_child(Element::new("a").with_attr("href", "/x").with_child(Node::text("there"))),
/// );
/// let extraction = extract(&tree);
/// assert_eq!(extraction.links, vec!["/x".to_string()]);
/// assert_eq!(extraction.text, "Hello there");
/// ```
pub fn extract(tree: &DocumentTree) -> Extraction {
    let mut extraction = Extraction::default();

    // Explicit stack; children go on in reverse so they pop in document order
    let mut pending: Vec<&Node> = tree.root().into_iter().collect();
    while let Some(node) = pending.pop() {
        match node {
            Node::Text(fragment) => extraction.push_text(fragment),
            Node::Element(element) => {
                if visit_element(element, &mut extraction) {
                    pending.extend(element.children.iter().rev());
                }
            }
        }
    }

    extraction
}

/// Records the element's own link and reports whether its children are visited
fn visit_element(element: &Element, out: &mut Extraction) -> bool {
    if element.tag == "a" {
        if let Some(href) = element.attr("href") {
            out.links.push(href.to_string());
        }
    }

    !SKIPPED_TAGS.contains(&element.tag.as_str())
}
