//! Appends widgets straight into the container, with no wrapper.

use tracing::trace;

use super::{Layout, LayoutResult};
use crate::context::LayoutContext;
use crate::dom::{Dom, NodeId};
use crate::model::Attributes;

#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleLayout;

impl SimpleLayout {
    pub fn new() -> Self {
        Self
    }
}

impl Layout for SimpleLayout {
    fn layout_widget(
        &mut self,
        dom: &mut Dom,
        widget: NodeId,
        _attrs: &Attributes,
        container: NodeId,
        _ctx: &LayoutContext,
    ) -> LayoutResult {
        if dom.is_empty_stub(widget) {
            trace!(?widget, "skipping empty stub");
            return Ok(());
        }
        dom.append_child(container, widget)
    }
}
