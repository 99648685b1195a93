//! Wraps every field in a pair of divs: one holding the label, one holding
//! the widget.
//!
//! ```text
//! div.outer
//!   div.label
//!     label[for=widget id]   "Name:"
//!   div.widget
//!     <widget>
//! ```
//!
//! The label div is left out when the field has no label text.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{apply_class, class_at, suffixed, Layout, LayoutResult};
use crate::context::LayoutContext;
use crate::dom::{Dom, NodeId};
use crate::model::Attributes;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DivLayoutConfig {
    /// Classes for the outer, label and widget divs, in that order.
    pub div_style_classes: Vec<Option<String>>,
    pub label_style_class: Option<String>,
    /// Added to the label of required, editable fields.
    pub label_required_style_class: Option<String>,
    pub label_suffix: String,
}

impl Default for DivLayoutConfig {
    fn default() -> Self {
        Self {
            div_style_classes: Vec::new(),
            label_style_class: None,
            label_required_style_class: None,
            label_suffix: ":".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DivLayout {
    config: Arc<DivLayoutConfig>,
}

impl DivLayout {
    pub fn new(config: impl Into<Arc<DivLayoutConfig>>) -> Self {
        Self {
            config: config.into(),
        }
    }

    pub fn config(&self) -> &DivLayoutConfig {
        &self.config
    }

    fn label_class(&self, attrs: &Attributes) -> Option<String> {
        let mut classes: Vec<&str> = Vec::new();
        if let Some(class) = self.config.label_style_class.as_deref() {
            classes.push(class);
        }
        if attrs.shows_required() {
            if let Some(class) = self.config.label_required_style_class.as_deref() {
                classes.push(class);
            }
        }
        let joined = classes.join(" ");
        (!joined.trim().is_empty()).then_some(joined)
    }
}

impl Layout for DivLayout {
    fn layout_widget(
        &mut self,
        dom: &mut Dom,
        widget: NodeId,
        attrs: &Attributes,
        container: NodeId,
        ctx: &LayoutContext,
    ) -> LayoutResult {
        if dom.is_empty_stub(widget) {
            trace!(?widget, "skipping empty stub");
            return Ok(());
        }
        let classes = &self.config.div_style_classes;

        let outer = dom.create_element("div");
        apply_class(dom, outer, class_at(classes, 0))?;

        let label_text = ctx.label_text(attrs);
        if !label_text.is_empty() {
            let label_div = dom.create_element("div");
            apply_class(dom, label_div, class_at(classes, 1))?;

            let label = dom.create_element("label");
            if let Some(id) = dom.attribute(widget, "id").map(str::to_string) {
                dom.set_attribute(label, "for", &id)?;
            }
            apply_class(dom, label, self.label_class(attrs).as_deref())?;
            dom.set_text(label, &suffixed(&label_text, &self.config.label_suffix))?;

            dom.append_child(label_div, label)?;
            dom.append_child(outer, label_div)?;
        }

        let widget_div = dom.create_element("div");
        apply_class(dom, widget_div, class_at(classes, 2))?;
        dom.append_child(widget_div, widget)?;
        dom.append_child(outer, widget_div)?;

        dom.append_child(container, outer)
    }
}
