//! # Element Tree
//!
//! The UI tree the layouts write into. Nodes live in an arena owned by
//! [`Dom`] and are addressed by [`NodeId`]. A node is either an element (a
//! tag plus ordered attributes) or a run of text.
//!
//! Layouts only ever create, attach and query nodes. They never remove or
//! free anything, so the arena only grows. Serialization ([`Dom::to_html`])
//! and the debugging outline ([`Dom::outline`]) live here rather than in
//! the layouts.
//!
//! Two marker elements carry meaning for layout:
//! - `stub`: a placeholder whose content is not known yet. Empty stubs are
//!   never placed.
//! - `facet`: a named auxiliary node (`header`, `footer`) handed to layouts
//!   out of band through the context.

use quick_xml::escape::escape;
use thiserror::Error;

/// Tag of placeholder elements.
pub const STUB_TAG: &str = "stub";

/// Tag of named auxiliary elements.
pub const FACET_TAG: &str = "facet";

/// Elements written without a closing tag when they have no children.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Handle to a node inside a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Failures raised by the tree itself. Layouts pass these through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("no node with id {0:?} in this tree")]
    UnknownNode(NodeId),
    #[error("node {0:?} is a text node and cannot hold attributes or children")]
    NotAnElement(NodeId),
    #[error("invalid attribute name {0:?}")]
    InvalidAttributeName(String),
    #[error("cannot append {child:?} to {parent:?}: it would become its own ancestor")]
    Cycle { parent: NodeId, child: NodeId },
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        tag: String,
        /// Kept in insertion order so output is stable.
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed element tree.
#[derive(Debug, Clone, Default)]
pub struct Dom {
    nodes: Vec<NodeData>,
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever created, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Creation ───────────────────────────────────────────────

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_string(),
            attributes: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn node(&self, id: NodeId) -> Result<&NodeData, DomError> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        let node = self.nodes.get_mut(id.0).ok_or(DomError::UnknownNode(id))?;
        match node.kind {
            NodeKind::Element { .. } => Ok(node),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    // ── Attributes ─────────────────────────────────────────────

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        if !is_valid_attribute_name(name) {
            return Err(DomError::InvalidAttributeName(name.to_string()));
        }
        let data = self.element_mut(node)?;
        if let NodeKind::Element { attributes, .. } = &mut data.kind {
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
        Ok(())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attributes(node)
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        match self.nodes.get(node.0).map(|n| &n.kind) {
            Some(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    // ── Structure ──────────────────────────────────────────────

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is moved, so laying out the same
    /// node twice never duplicates it.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.element_mut(parent)?;
        self.node(child)?;

        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(DomError::Cycle { parent, child });
            }
            cursor = self.nodes[id.0].parent;
        }

        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Remove a node from its parent. Its own subtree stays intact.
    pub fn detach(&mut self, node: NodeId) {
        let parent = self.nodes.get_mut(node.0).and_then(|n| n.parent.take());
        if let Some(parent) = parent {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.children(node).get(index).copied()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(node.0).map(|n| &n.kind)
    }

    /// Element tag, `None` for text nodes and unknown ids.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match self.kind(node)? {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    // ── Text ───────────────────────────────────────────────────

    /// Replace all children of `node` with a single text node.
    /// An empty string leaves the element empty.
    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), DomError> {
        let old = std::mem::take(&mut self.element_mut(node)?.children);
        for child in old {
            self.nodes[child.0].parent = None;
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(node, text_node)?;
        }
        Ok(())
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match self.kind(node) {
            Some(NodeKind::Text(text)) => out.push_str(text),
            Some(NodeKind::Element { .. }) => {
                for &child in self.children(node) {
                    self.collect_text(child, out);
                }
            }
            None => {}
        }
    }

    // ── Markers ────────────────────────────────────────────────

    pub fn is_stub(&self, node: NodeId) -> bool {
        self.tag(node)
            .is_some_and(|tag| tag.eq_ignore_ascii_case(STUB_TAG))
    }

    /// A stub that has nothing inside it yet.
    pub fn is_empty_stub(&self, node: NodeId) -> bool {
        self.is_stub(node) && self.children(node).is_empty()
    }

    pub fn is_facet(&self, node: NodeId) -> bool {
        self.tag(node)
            .is_some_and(|tag| tag.eq_ignore_ascii_case(FACET_TAG))
    }

    /// The `name` of a facet element.
    pub fn facet_name(&self, node: NodeId) -> Option<&str> {
        if self.is_facet(node) {
            self.attribute(node, "name")
        } else {
            None
        }
    }

    // ── Output ─────────────────────────────────────────────────

    /// One-line summary of a node: the tag followed by its attributes,
    /// e.g. `label for="name" class="required"`. Text nodes show as
    /// their quoted content.
    pub fn describe(&self, node: NodeId) -> String {
        match self.kind(node) {
            Some(NodeKind::Element { tag, attributes }) => {
                let mut out = tag.clone();
                for (key, value) in attributes {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(value);
                    out.push('"');
                }
                out
            }
            Some(NodeKind::Text(text)) => format!("{:?}", text),
            None => String::from("<unknown>"),
        }
    }

    /// Indented outline of a subtree, one [`describe`](Self::describe)
    /// line per node.
    pub fn outline(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_outline(node, 0, &mut out);
        out
    }

    fn write_outline(&self, node: NodeId, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&self.describe(node));
        out.push('\n');
        for &child in self.children(node) {
            self.write_outline(child, depth + 1, out);
        }
    }

    /// Serialize a subtree as HTML markup.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        match self.kind(node) {
            Some(NodeKind::Text(text)) => out.push_str(&escape(text.as_str())),
            Some(NodeKind::Element { tag, attributes }) => {
                out.push('<');
                out.push_str(tag);
                for (key, value) in attributes {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape(value.as_str()));
                    out.push('"');
                }
                out.push('>');

                let children = self.children(node);
                if children.is_empty() && VOID_TAGS.contains(&tag.as_str()) {
                    return;
                }
                for &child in children {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            None => {}
        }
    }
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '<' | '>' | '/'))
}
