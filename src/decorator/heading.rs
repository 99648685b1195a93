//! Flat sections: a heading element per newly entered section.
//!
//! ```text
//! widget1
//! h1 "Section 1"
//! widget2.1
//! widget2.2
//! h2 "Section 1.1"
//! widget2.3.1
//! h1 "Section 2"
//! widget3
//! ```
//!
//! Leaving a section emits nothing. Headings are handed to the delegate as
//! unlabelled, full-width fields, so a table delegate gives each one its
//! own row.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{claim_sections, section_widget_attributes, SectionTransition};
use crate::context::LayoutContext;
use crate::dom::{Dom, DomError, NodeId};
use crate::layout::{apply_class, Layout, LayoutResult};
use crate::model::{Attributes, SectionPath};

/// Deepest heading level HTML has.
const MAX_HEADING_LEVEL: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingTagConfig {
    pub style_class: Option<String>,
}

pub struct HeadingTagLayoutDecorator<L = Box<dyn Layout>> {
    delegate: L,
    config: Arc<HeadingTagConfig>,
    current: SectionPath,
}

impl<L: Layout> HeadingTagLayoutDecorator<L> {
    pub fn new(delegate: L) -> Self {
        Self::with_config(delegate, HeadingTagConfig::default())
    }

    pub fn with_config(delegate: L, config: impl Into<Arc<HeadingTagConfig>>) -> Self {
        Self {
            delegate,
            config: config.into(),
            current: SectionPath::default(),
        }
    }

    pub fn delegate(&self) -> &L {
        &self.delegate
    }

    /// The section path of the last field that named one.
    pub fn current_path(&self) -> &SectionPath {
        &self.current
    }

    fn heading(&self, dom: &mut Dom, depth: usize, text: &str) -> Result<NodeId, DomError> {
        let level = depth.clamp(1, MAX_HEADING_LEVEL);
        let heading = dom.create_element(&format!("h{}", level));
        apply_class(dom, heading, self.config.style_class.as_deref())?;
        dom.set_text(heading, text)?;
        Ok(heading)
    }
}

impl<L: Layout> Layout for HeadingTagLayoutDecorator<L> {
    fn on_start_build(&mut self, ctx: &LayoutContext) -> LayoutResult {
        self.current = SectionPath::default();
        self.delegate.on_start_build(ctx)
    }

    fn start_container_layout(
        &mut self,
        dom: &mut Dom,
        container: NodeId,
        ctx: &LayoutContext,
    ) -> LayoutResult {
        self.current = SectionPath::default();
        self.delegate.start_container_layout(dom, container, ctx)
    }

    fn layout_widget(
        &mut self,
        dom: &mut Dom,
        widget: NodeId,
        attrs: &Attributes,
        container: NodeId,
        ctx: &LayoutContext,
    ) -> LayoutResult {
        let nested = self.delegate.handles_sections();
        let mut forwarded = Cow::Borrowed(attrs);
        if let Some(path) = attrs.section_path() {
            let (path, claimed) = claim_sections(path, attrs, nested);
            forwarded = claimed;
            let transition = SectionTransition::between(self.current.segments(), &path);
            for (offset, section) in transition.open.iter().enumerate() {
                if section.is_empty() {
                    continue;
                }
                let depth = transition.keep + offset + 1;
                debug!(depth, section = %section, "section heading");
                let heading = self.heading(dom, depth, ctx.section_text(section))?;
                self.delegate.layout_widget(
                    dom,
                    heading,
                    &section_widget_attributes(nested),
                    container,
                    ctx,
                )?;
            }
            self.current = path;
        }
        self.delegate
            .layout_widget(dom, widget, &forwarded, container, ctx)
    }

    fn end_container_layout(
        &mut self,
        dom: &mut Dom,
        container: NodeId,
        ctx: &LayoutContext,
    ) -> LayoutResult {
        self.delegate.end_container_layout(dom, container, ctx)
    }

    fn on_end_build(&mut self, ctx: &LayoutContext) -> LayoutResult {
        self.delegate.on_end_build(ctx)
    }

    fn handles_sections(&self) -> bool {
        true
    }
}
