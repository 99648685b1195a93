//! Drives one build: fires the layout hooks in order over the fields of a
//! container.

use tracing::{debug, info};

use crate::context::LayoutContext;
use crate::dom::{Dom, NodeId};
use crate::error::FormnestError;
use crate::layout::{Layout, LayoutResult};
use crate::model::{Attributes, FormDocument};

/// Lay `fields` out into `container`, in order.
///
/// The hooks fire as `on_start_build`, `start_container_layout`, one
/// `layout_widget` per field, `end_container_layout`, `on_end_build`. The
/// first error stops the build. Nodes created before it stay in `dom`.
pub fn run_build<L: Layout + ?Sized>(
    layout: &mut L,
    dom: &mut Dom,
    container: NodeId,
    fields: &[(NodeId, Attributes)],
    ctx: &LayoutContext,
) -> LayoutResult {
    layout.on_start_build(ctx)?;
    layout.start_container_layout(dom, container, ctx)?;
    for (widget, attrs) in fields {
        layout.layout_widget(dom, *widget, attrs, container, ctx)?;
    }
    layout.end_container_layout(dom, container, ctx)?;
    layout.on_end_build(ctx)
}

/// The tree a [`FormDocument`] produced.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub dom: Dom,
    pub container: NodeId,
}

impl Rendered {
    pub fn to_html(&self) -> String {
        self.dom.to_html(self.container)
    }

    pub fn outline(&self) -> String {
        self.dom.outline(self.container)
    }
}

impl FormDocument {
    /// Materialize the facets and widgets, build the layout chain and run
    /// it over a fresh container.
    pub fn render(&self) -> Result<Rendered, FormnestError> {
        let mut dom = Dom::new();
        let mut ctx = LayoutContext::from_spec(&self.context);
        for facet in &self.facets {
            ctx.overridden_nodes.push(facet.materialize(&mut dom)?);
        }

        let container = dom.create_element(&self.container_tag);
        let mut fields = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let widget = field.widget.materialize(&mut dom)?;
            fields.push((widget, field.attributes.clone()));
        }

        let mut layout = self.layout.build();
        info!(
            layout = %self.layout.describe(),
            fields = fields.len(),
            facets = self.facets.len(),
            "building form"
        );
        run_build(&mut layout, &mut dom, container, &fields, &ctx)?;
        debug!(nodes = dom.len(), "build finished");

        Ok(Rendered { dom, container })
    }
}
