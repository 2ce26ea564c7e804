//! Document tree types consumed by the extraction walk
//!
//! The tree is produced by a [`TreeBuilder`](crate::crawler::TreeBuilder) and
//! owned by the parse unit that built it.

/// A single node: either a raw text fragment or an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Raw, untrimmed text
    Text(String),

    /// A tagged element with attributes and ordered children
    Element(Element),
}

/// An element node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase local tag name (e.g. "a", "script")
    pub tag: String,

    /// Attributes in stored order
    pub attrs: Vec<(String, String)>,

    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes and no children
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute, keeping insertion order
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Appends a child node
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Returns the value of the first attribute with the given name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

// Children are released from an explicit stack so dropping a deeply
// nested tree does not recurse once per level.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

impl Node {
    /// Shorthand for a text node
    pub fn text(fragment: impl Into<String>) -> Self {
        Node::Text(fragment.into())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// A rooted document tree; an empty document has no root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTree {
    root: Option<Node>,
}

impl DocumentTree {
    pub fn new(root: impl Into<Node>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }
}
