//! Build-scoped context passed by reference through the whole layout
//! chain.
//!
//! The orchestrator fills it in before the build starts. Layouts only
//! read it.

use std::collections::BTreeMap;

use crate::dom::{Dom, NodeId};
use crate::model::{Attributes, ContextSpec};
use crate::text::{camel_case, capitalize, humanize};

#[derive(Debug, Clone, Default)]
pub struct LayoutContext {
    /// Path of the object being rendered, e.g. `person.address`.
    pub path: Option<String>,
    /// Nodes supplied out of band, such as `header` and `footer` facets.
    pub overridden_nodes: Vec<NodeId>,
    /// Localized messages.
    pub bundle: BTreeMap<String, String>,
}

impl LayoutContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(path: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            ..Self::default()
        }
    }

    pub fn from_spec(spec: &ContextSpec) -> Self {
        Self {
            path: spec.path.clone(),
            overridden_nodes: Vec::new(),
            bundle: spec.bundle.clone(),
        }
    }

    /// The overridden facet called `name`, if one was supplied.
    pub fn facet(&self, dom: &Dom, name: &str) -> Option<NodeId> {
        self.overridden_nodes
            .iter()
            .copied()
            .find(|&node| dom.facet_name(node) == Some(name))
    }

    /// Look `key` up in the bundle, falling back to `fallback`.
    pub fn localize<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.bundle.get(key).map(String::as_str).unwrap_or(fallback)
    }

    /// Display text for a section name, keyed by its camelCase form.
    pub fn section_text<'a>(&'a self, section: &'a str) -> &'a str {
        self.localize(&camel_case(section), section)
    }

    /// Label for a field: the explicit `label` attribute, else the bundle
    /// entry for its name, else the humanized name. Empty when none of
    /// these exist.
    pub fn label_text(&self, attrs: &Attributes) -> String {
        if let Some(label) = &attrs.label {
            return label.clone();
        }
        match &attrs.name {
            Some(name) => match self.bundle.get(name) {
                Some(localized) => localized.clone(),
                None => humanize(name),
            },
            None => String::new(),
        }
    }

    /// The context path with dots camel-joined: `person.address` →
    /// `personAddress`. `None` when there is no path.
    pub fn path_id(&self) -> Option<String> {
        let path = self.path.as_deref().filter(|p| !p.is_empty())?;
        let mut id = String::with_capacity(path.len());
        for (i, segment) in path.split('.').enumerate() {
            if i == 0 {
                id.push_str(segment);
            } else {
                id.push_str(&capitalize(segment));
            }
        }
        Some(id)
    }

    /// Prefix for ids derived from a field name: the path id followed by
    /// the PascalCase name, or the bare name without a path.
    pub fn id_prefix(&self, name: &str) -> String {
        match self.path_id() {
            Some(path) => path + &capitalize(name),
            None => name.to_string(),
        }
    }
}
