//! # Layouts
//!
//! A layout receives the fields of one build in order and places each
//! widget into a container. Every layout, leaf or decorator, implements
//! the same five hooks:
//!
//! ```text
//! on_start_build
//!   start_container_layout(container)
//!     layout_widget(widget, attrs, container)   × one per field
//!   end_container_layout(container)
//! on_end_build
//! ```
//!
//! All hooks default to doing nothing, so a layout only implements the
//! ones it cares about. Every hook returns the tree's own error unchanged.
//! Layouts never retry, because retrying would duplicate nodes.
//!
//! The leaf layouts here never nest anything themselves. Section nesting is
//! added by wrapping a leaf in one of the [`crate::decorator`] layouts.

pub mod div;
pub mod simple;
pub mod table;

pub use div::{DivLayout, DivLayoutConfig};
pub use simple::SimpleLayout;
pub use table::{TableLayout, TableLayoutConfig};

use crate::context::LayoutContext;
use crate::dom::{Dom, DomError, NodeId};
use crate::model::Attributes;

pub type LayoutResult = Result<(), DomError>;

/// The lifecycle contract shared by leaf layouts and decorators.
pub trait Layout {
    fn on_start_build(&mut self, _ctx: &LayoutContext) -> LayoutResult {
        Ok(())
    }

    fn start_container_layout(
        &mut self,
        _dom: &mut Dom,
        _container: NodeId,
        _ctx: &LayoutContext,
    ) -> LayoutResult {
        Ok(())
    }

    fn layout_widget(
        &mut self,
        _dom: &mut Dom,
        _widget: NodeId,
        _attrs: &Attributes,
        _container: NodeId,
        _ctx: &LayoutContext,
    ) -> LayoutResult {
        Ok(())
    }

    fn end_container_layout(
        &mut self,
        _dom: &mut Dom,
        _container: NodeId,
        _ctx: &LayoutContext,
    ) -> LayoutResult {
        Ok(())
    }

    fn on_end_build(&mut self, _ctx: &LayoutContext) -> LayoutResult {
        Ok(())
    }

    /// Whether this layout turns the `section` attribute into structure
    /// itself. A decorator over such a layout handles only the outermost
    /// section level and leaves the rest to it.
    fn handles_sections(&self) -> bool {
        false
    }
}

impl<L: Layout + ?Sized> Layout for Box<L> {
    fn on_start_build(&mut self, ctx: &LayoutContext) -> LayoutResult {
        (**self).on_start_build(ctx)
    }

    fn start_container_layout(
        &mut self,
        dom: &mut Dom,
        container: NodeId,
        ctx: &LayoutContext,
    ) -> LayoutResult {
        (**self).start_container_layout(dom, container, ctx)
    }

    fn layout_widget(
        &mut self,
        dom: &mut Dom,
        widget: NodeId,
        attrs: &Attributes,
        container: NodeId,
        ctx: &LayoutContext,
    ) -> LayoutResult {
        (**self).layout_widget(dom, widget, attrs, container, ctx)
    }

    fn end_container_layout(
        &mut self,
        dom: &mut Dom,
        container: NodeId,
        ctx: &LayoutContext,
    ) -> LayoutResult {
        (**self).end_container_layout(dom, container, ctx)
    }

    fn on_end_build(&mut self, ctx: &LayoutContext) -> LayoutResult {
        (**self).on_end_build(ctx)
    }

    fn handles_sections(&self) -> bool {
        (**self).handles_sections()
    }
}

/// Label text followed by the suffix. An empty label stays empty.
pub(crate) fn suffixed(label: &str, suffix: &str) -> String {
    if label.is_empty() {
        String::new()
    } else {
        format!("{}{}", label, suffix)
    }
}

/// Entry `index` of a class list. Unset or out of range gives `None`.
pub(crate) fn class_at(classes: &[Option<String>], index: usize) -> Option<&str> {
    classes.get(index).and_then(|c| c.as_deref())
}

/// Set `class` on `node` when there is one.
pub(crate) fn apply_class(dom: &mut Dom, node: NodeId, class: Option<&str>) -> LayoutResult {
    match class {
        Some(class) if !class.is_empty() => dom.set_attribute(node, "class", class),
        _ => Ok(()),
    }
}
