//! # Form Model
//!
//! The input side of a build: the attribute record each field carries, the
//! section path parsed out of it, and the JSON form document the CLI and
//! [`crate::render_json`] accept.
//!
//! Attributes arrive from introspection as a flat string-to-string map.
//! They are lifted into [`Attributes`], which keeps the keys layout cares
//! about as typed fields and everything else in an extension map, and
//! serializes back to the same flat shape.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::LayoutSpec;
use crate::dom::{Dom, DomError, NodeId, FACET_TAG};

pub const NAME: &str = "name";
pub const LABEL: &str = "label";
pub const SECTION: &str = "section";
pub const REQUIRED: &str = "required";
pub const READ_ONLY: &str = "readOnly";
pub const LARGE: &str = "large";
pub const ROOT: &str = "_root";

const TRUE: &str = "true";

/// Metadata attached to one field.
///
/// Boolean keys are set only by the exact string `"true"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Attributes {
    pub name: Option<String>,
    /// Explicit label. `Some("")` suppresses the label entirely.
    pub label: Option<String>,
    /// Raw comma-separated section path. `None` means "stay in the current
    /// section", `Some("")` means "leave all sections".
    pub section: Option<String>,
    pub required: bool,
    pub read_only: bool,
    pub large: bool,
    /// The field is the object being inspected rather than one of its
    /// properties.
    pub root: bool,
    /// Keys this crate does not interpret.
    pub extra: BTreeMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Attributes for containers the section decorators inject: no label,
    /// spanning the full width.
    pub fn section_widget() -> Self {
        Self {
            label: Some(String::new()),
            large: true,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_large(mut self, large: bool) -> Self {
        self.large = large;
        self
    }

    pub fn with_root(mut self, root: bool) -> Self {
        self.root = root;
        self
    }

    pub fn with_extra(mut self, key: &str, value: &str) -> Self {
        self.extra.insert(key.to_string(), value.to_string());
        self
    }

    /// Whether the field should be flagged as required to the user.
    /// Read-only fields never are.
    pub fn shows_required(&self) -> bool {
        self.required && !self.read_only
    }

    /// The parsed section path, or `None` when the field does not say
    /// which section it belongs to.
    pub fn section_path(&self) -> Option<SectionPath> {
        self.section.as_deref().map(SectionPath::parse)
    }
}

impl From<BTreeMap<String, String>> for Attributes {
    fn from(mut map: BTreeMap<String, String>) -> Self {
        let mut flag = |key: &str| map.remove(key).is_some_and(|v| v == TRUE);
        let required = flag(REQUIRED);
        let read_only = flag(READ_ONLY);
        let large = flag(LARGE);
        let root = flag(ROOT);
        Self {
            name: map.remove(NAME),
            label: map.remove(LABEL),
            section: map.remove(SECTION),
            required,
            read_only,
            large,
            root,
            extra: map,
        }
    }
}

impl From<Attributes> for BTreeMap<String, String> {
    fn from(attrs: Attributes) -> Self {
        let mut map = attrs.extra;
        let strings = [
            (NAME, attrs.name),
            (LABEL, attrs.label),
            (SECTION, attrs.section),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                map.insert(key.to_string(), value);
            }
        }
        let flags = [
            (REQUIRED, attrs.required),
            (READ_ONLY, attrs.read_only),
            (LARGE, attrs.large),
            (ROOT, attrs.root),
        ];
        for (key, set) in flags {
            if set {
                map.insert(key.to_string(), TRUE.to_string());
            }
        }
        map
    }
}

// ── Section paths ──────────────────────────────────────────────

/// An ordered list of section names, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionPath(Vec<String>);

impl SectionPath {
    /// Split a `section` attribute on commas. Segments are trimmed and
    /// trailing empty segments dropped, so `""` and `" , "` are both the
    /// empty path.
    pub fn parse(raw: &str) -> Self {
        let mut segments: Vec<String> = raw.split(',').map(|s| s.trim().to_string()).collect();
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of leading segments shared with `other`. Exact,
    /// case-sensitive comparison.
    pub fn common_prefix_len<S: AsRef<str>>(&self, other: &[S]) -> usize {
        self.0
            .iter()
            .zip(other)
            .take_while(|(a, b)| a.as_str() == AsRef::<str>::as_ref(*b))
            .count()
    }

    /// Split into the outermost segment and everything below it. The
    /// remainder keeps its depth by leaving the first level blank, so
    /// `"A,B"` splits into `"A"` and `",B"`.
    pub fn split_outermost(&self) -> (SectionPath, SectionPath) {
        let outer = Self(self.0.iter().take(1).cloned().collect());
        let mut rest = self.0.clone();
        if let Some(first) = rest.first_mut() {
            first.clear();
        }
        if rest.iter().all(String::is_empty) {
            rest.clear();
        }
        (outer, Self(rest))
    }
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

// ── Form documents ─────────────────────────────────────────────

/// A complete build described as JSON: the layout chain, the context and
/// the fields in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    pub layout: LayoutSpec,

    #[serde(default)]
    pub context: ContextSpec,

    /// Tag of the container element the fields are laid out into.
    #[serde(default = "default_container_tag")]
    pub container_tag: String,

    /// Named auxiliary nodes, e.g. table header and footer.
    #[serde(default)]
    pub facets: Vec<FacetSpec>,

    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

fn default_container_tag() -> String {
    "form".to_string()
}

/// Serializable part of the layout context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSpec {
    /// Path of the object being rendered, e.g. `person.address`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Localized messages keyed by field name or camelCased section name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bundle: BTreeMap<String, String>,
}

/// One field: the widget produced for it and its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub widget: WidgetSpec,
    #[serde(default)]
    pub attributes: Attributes,
}

/// A widget subtree, as produced by the widget pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WidgetSpec>,
}

impl WidgetSpec {
    /// Create the widget's nodes in `dom`, detached.
    pub fn materialize(&self, dom: &mut Dom) -> Result<NodeId, DomError> {
        let node = dom.create_element(&self.tag);
        for (key, value) in &self.attributes {
            dom.set_attribute(node, key, value)?;
        }
        if let Some(text) = &self.text {
            dom.set_text(node, text)?;
        }
        for child in &self.children {
            let child = child.materialize(dom)?;
            dom.append_child(node, child)?;
        }
        Ok(node)
    }
}

/// A named facet and its content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetSpec {
    pub name: String,
    #[serde(default)]
    pub children: Vec<WidgetSpec>,
}

impl FacetSpec {
    pub fn materialize(&self, dom: &mut Dom) -> Result<NodeId, DomError> {
        let facet = dom.create_element(FACET_TAG);
        dom.set_attribute(facet, NAME, &self.name)?;
        for child in &self.children {
            let child = child.materialize(dom)?;
            dom.append_child(facet, child)?;
        }
        Ok(facet)
    }
}
