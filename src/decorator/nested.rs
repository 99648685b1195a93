//! Nested sections: every section becomes a div the fields of that section
//! are laid out into.
//!
//! ```text
//! widget1
//! div[title="Section 1"]
//!   widget2.1
//!   widget2.2
//!   div[title="Section 1.1"]
//!     widget2.3.1
//! div[title="Section 2"]
//!   widget3
//! ```
//!
//! A section div is itself a field of its parent container as far as the
//! delegate is concerned, and a container of its own afterwards. With a
//! [`TableLayout`](crate::layout::TableLayout) delegate the div lands in a
//! full-width row of the parent table and gets a nested table of its own.
//!
//! A blank segment in a path (`",Inner"`) opens no div. It still counts as
//! a level when paths are compared.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{claim_sections, section_widget_attributes, SectionTransition};
use crate::context::LayoutContext;
use crate::dom::{Dom, NodeId};
use crate::layout::{apply_class, Layout, LayoutResult};
use crate::model::Attributes;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DivDecoratorConfig {
    /// Inline `style` for section divs.
    pub style: Option<String>,
    pub style_class: Option<String>,
}

#[derive(Debug, Clone)]
struct OpenSection {
    name: String,
    /// `None` for a blank segment.
    div: Option<NodeId>,
}

impl AsRef<str> for OpenSection {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

pub struct DivLayoutDecorator<L = Box<dyn Layout>> {
    delegate: L,
    config: Arc<DivDecoratorConfig>,
    open: Vec<OpenSection>,
}

impl<L: Layout> DivLayoutDecorator<L> {
    pub fn new(delegate: L) -> Self {
        Self::with_config(delegate, DivDecoratorConfig::default())
    }

    pub fn with_config(delegate: L, config: impl Into<Arc<DivDecoratorConfig>>) -> Self {
        Self {
            delegate,
            config: config.into(),
            open: Vec::new(),
        }
    }

    pub fn delegate(&self) -> &L {
        &self.delegate
    }

    /// Names of the sections currently open, outermost first.
    pub fn open_sections(&self) -> impl Iterator<Item = &str> {
        self.open.iter().map(|s| s.name.as_str())
    }

    /// Where the next field goes: the innermost open div, or `container`
    /// when no div is open.
    fn current_container(&self, container: NodeId) -> NodeId {
        self.open
            .iter()
            .rev()
            .find_map(|s| s.div)
            .unwrap_or(container)
    }

    /// Close open sections, innermost first, until `depth` remain.
    fn close_to(&mut self, dom: &mut Dom, depth: usize, ctx: &LayoutContext) -> LayoutResult {
        while self.open.len() > depth {
            let Some(section) = self.open.pop() else {
                break;
            };
            if let Some(div) = section.div {
                debug!(section = %section.name, "closing section");
                self.delegate.end_container_layout(dom, div, ctx)?;
            }
        }
        Ok(())
    }

    fn open_section(
        &mut self,
        dom: &mut Dom,
        name: &str,
        container: NodeId,
        ctx: &LayoutContext,
    ) -> LayoutResult {
        if name.is_empty() {
            self.open.push(OpenSection {
                name: String::new(),
                div: None,
            });
            return Ok(());
        }

        let parent = self.current_container(container);
        let div = dom.create_element("div");
        dom.set_attribute(div, "title", ctx.section_text(name))?;
        if let Some(style) = self.config.style.as_deref() {
            dom.set_attribute(div, "style", style)?;
        }
        apply_class(dom, div, self.config.style_class.as_deref())?;
        debug!(section = %name, depth = self.open.len() + 1, "opening section");

        let attrs = section_widget_attributes(self.delegate.handles_sections());
        self.delegate.layout_widget(dom, div, &attrs, parent, ctx)?;
        self.delegate.start_container_layout(dom, div, ctx)?;
        self.open.push(OpenSection {
            name: name.to_string(),
            div: Some(div),
        });
        Ok(())
    }
}

impl<L: Layout> Layout for DivLayoutDecorator<L> {
    fn on_start_build(&mut self, ctx: &LayoutContext) -> LayoutResult {
        self.open.clear();
        self.delegate.on_start_build(ctx)
    }

    fn start_container_layout(
        &mut self,
        dom: &mut Dom,
        container: NodeId,
        ctx: &LayoutContext,
    ) -> LayoutResult {
        self.open.clear();
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
        let mut forwarded = Cow::Borrowed(attrs);
        if let Some(path) = attrs.section_path() {
            let (path, claimed) = claim_sections(path, attrs, self.delegate.handles_sections());
            forwarded = claimed;
            let transition = SectionTransition::between(self.open.as_slice(), &path);
            self.close_to(dom, transition.keep, ctx)?;
            for name in transition.open {
                self.open_section(dom, name, container, ctx)?;
            }
        }
        let target = self.current_container(container);
        self.delegate
            .layout_widget(dom, widget, &forwarded, target, ctx)
    }

    fn end_container_layout(
        &mut self,
        dom: &mut Dom,
        container: NodeId,
        ctx: &LayoutContext,
    ) -> LayoutResult {
        self.close_to(dom, 0, ctx)?;
        self.delegate.end_container_layout(dom, container, ctx)
    }

    fn on_end_build(&mut self, ctx: &LayoutContext) -> LayoutResult {
        self.delegate.on_end_build(ctx)
    }

    fn handles_sections(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorator::HeadingTagLayoutDecorator;
    use crate::layout::{SimpleLayout, TableLayout};

    /// Records every hook it sees, with the node each one targets.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Layout for Recorder {
        fn on_start_build(&mut self, _ctx: &LayoutContext) -> LayoutResult {
            self.calls.push("on_start_build".into());
            Ok(())
        }

        fn start_container_layout(
            &mut self,
            dom: &mut Dom,
            container: NodeId,
            _ctx: &LayoutContext,
        ) -> LayoutResult {
            self.calls.push(format!("start {}", dom.describe(container)));
            Ok(())
        }

        fn layout_widget(
            &mut self,
            dom: &mut Dom,
            widget: NodeId,
            _attrs: &Attributes,
            container: NodeId,
            _ctx: &LayoutContext,
        ) -> LayoutResult {
            self.calls.push(format!(
                "layout {} into {}",
                dom.describe(widget),
                dom.describe(container)
            ));
            Ok(())
        }

        fn end_container_layout(
            &mut self,
            dom: &mut Dom,
            container: NodeId,
            _ctx: &LayoutContext,
        ) -> LayoutResult {
            self.calls.push(format!("end {}", dom.describe(container)));
            Ok(())
        }

        fn on_end_build(&mut self, _ctx: &LayoutContext) -> LayoutResult {
            self.calls.push("on_end_build".into());
            Ok(())
        }
    }

    fn lay_out<L: Layout>(
        layout: &mut L,
        dom: &mut Dom,
        container: NodeId,
        fields: &[(&str, Option<&str>)],
        ctx: &LayoutContext,
    ) {
        for (tag, section) in fields {
            let widget = dom.create_element(tag);
            let attrs = match section {
                Some(section) => Attributes::new().with_section(section),
                None => Attributes::new(),
            };
            layout
                .layout_widget(dom, widget, &attrs, container, ctx)
                .unwrap();
        }
    }

    #[test]
    fn delegates_every_hook() {
        let mut dom = Dom::new();
        let container = dom.create_element("form");
        let ctx = LayoutContext::new();
        let mut layout = DivLayoutDecorator::new(Recorder::default());

        layout.on_start_build(&ctx).unwrap();
        layout.start_container_layout(&mut dom, container, &ctx).unwrap();
        lay_out(&mut layout, &mut dom, container, &[("widget1", None)], &ctx);
        layout.end_container_layout(&mut dom, container, &ctx).unwrap();
        layout.on_end_build(&ctx).unwrap();

        assert_eq!(
            layout.delegate().calls,
            [
                "on_start_build",
                "start form",
                "layout widget1 into form",
                "end form",
                "on_end_build",
            ]
        );
    }

    #[test]
    fn opens_and_closes_section_containers() {
        let mut dom = Dom::new();
        let container = dom.create_element("form");
        let ctx = LayoutContext::new();
        let mut layout = DivLayoutDecorator::new(Recorder::default());

        layout.start_container_layout(&mut dom, container, &ctx).unwrap();
        lay_out(
            &mut layout,
            &mut dom,
            container,
            &[("a", Some("A,B")), ("b", Some("A,C")), ("c", Some(""))],
            &ctx,
        );
        layout.end_container_layout(&mut dom, container, &ctx).unwrap();

        assert_eq!(
            layout.delegate().calls,
            [
                "start form",
                r#"layout div title="A" into form"#,
                r#"start div title="A""#,
                r#"layout div title="B" into div title="A""#,
                r#"start div title="B""#,
                r#"layout a into div title="B""#,
                r#"end div title="B""#,
                r#"layout div title="C" into div title="A""#,
                r#"start div title="C""#,
                r#"layout b into div title="C""#,
                r#"end div title="C""#,
                r#"end div title="A""#,
                "layout c into form",
                "end form",
            ]
        );
    }

    #[test]
    fn end_of_container_closes_open_sections() {
        let mut dom = Dom::new();
        let container = dom.create_element("form");
        let ctx = LayoutContext::new();
        let mut layout = DivLayoutDecorator::new(Recorder::default());

        lay_out(&mut layout, &mut dom, container, &[("a", Some("A,B"))], &ctx);
        assert_eq!(layout.open_sections().collect::<Vec<_>>(), ["A", "B"]);
        layout.end_container_layout(&mut dom, container, &ctx).unwrap();
        assert_eq!(layout.open_sections().count(), 0);

        let tail: Vec<&str> = layout
            .delegate()
            .calls
            .iter()
            .rev()
            .take(3)
            .map(String::as_str)
            .collect();
        assert_eq!(tail, ["end form", r#"end div title="A""#, r#"end div title="B""#]);
    }

    #[test]
    fn start_build_resets_open_sections() {
        let mut dom = Dom::new();
        let ctx = LayoutContext::new();
        let mut layout = DivLayoutDecorator::new(SimpleLayout::new());

        // A build that stops inside section "S".
        let first = dom.create_element("form");
        layout.on_start_build(&ctx).unwrap();
        layout.start_container_layout(&mut dom, first, &ctx).unwrap();
        lay_out(&mut layout, &mut dom, first, &[("a", Some("S"))], &ctx);
        assert_eq!(layout.open_sections().collect::<Vec<_>>(), ["S"]);

        let second = dom.create_element("form");
        layout.on_start_build(&ctx).unwrap();
        assert_eq!(layout.open_sections().count(), 0);
        lay_out(&mut layout, &mut dom, second, &[("b", None)], &ctx);

        assert_eq!(dom.outline(second), "form\n  b\n");
    }

    #[test]
    fn start_container_resets_open_sections() {
        let mut dom = Dom::new();
        let ctx = LayoutContext::new();
        let mut layout = DivLayoutDecorator::new(SimpleLayout::new());

        let first = dom.create_element("form");
        layout.start_container_layout(&mut dom, first, &ctx).unwrap();
        lay_out(&mut layout, &mut dom, first, &[("a", Some("S"))], &ctx);

        let second = dom.create_element("form");
        layout.start_container_layout(&mut dom, second, &ctx).unwrap();
        assert_eq!(layout.open_sections().count(), 0);
        lay_out(&mut layout, &mut dom, second, &[("b", None)], &ctx);

        assert_eq!(dom.outline(second), "form\n  b\n");
    }

    #[test]
    fn stacked_div_decorators_open_each_section_once() {
        let mut dom = Dom::new();
        let container = dom.create_element("form");
        let ctx = LayoutContext::new();
        let mut layout = DivLayoutDecorator::new(DivLayoutDecorator::new(SimpleLayout::new()));

        layout.on_start_build(&ctx).unwrap();
        layout.start_container_layout(&mut dom, container, &ctx).unwrap();
        lay_out(
            &mut layout,
            &mut dom,
            container,
            &[
                ("w1", None),
                ("w2.1", Some("Section 1")),
                ("w2.2", None),
                ("w2.3.1", Some("Section 1,Section 1.1")),
                ("w3", Some("Section 2")),
                ("w4", Some("")),
                ("w5", None),
            ],
            &ctx,
        );
        layout.end_container_layout(&mut dom, container, &ctx).unwrap();
        layout.on_end_build(&ctx).unwrap();

        assert_eq!(
            dom.outline(container),
            r#"form
  w1
  div title="Section 1"
    w2.1
    w2.2
    div title="Section 1.1"
      w2.3.1
  div title="Section 2"
    w3
  w4
  w5
"#
        );
        assert_eq!(layout.open_sections().count(), 0);
        assert_eq!(layout.delegate().open_sections().count(), 0);
    }

    #[test]
    fn headings_inside_section_divs_keep_their_depth() {
        let mut dom = Dom::new();
        let container = dom.create_element("form");
        let ctx = LayoutContext::new();
        let mut layout =
            DivLayoutDecorator::new(HeadingTagLayoutDecorator::new(SimpleLayout::new()));

        layout.start_container_layout(&mut dom, container, &ctx).unwrap();
        lay_out(&mut layout, &mut dom, container, &[("a", Some("A,B"))], &ctx);

        assert_eq!(
            dom.outline(container),
            r#"form
  div title="A"
    h2
      "B"
    a
"#
        );
    }

    #[test]
    fn blank_segments_open_no_div() {
        let mut dom = Dom::new();
        let container = dom.create_element("form");
        let ctx = LayoutContext::new();
        let mut layout = DivLayoutDecorator::new(SimpleLayout::new());

        lay_out(&mut layout, &mut dom, container, &[("a", Some(",Inner"))], &ctx);

        let inner = dom.children(container)[0];
        assert_eq!(dom.describe(inner), r#"div title="Inner""#);
        assert_eq!(dom.tag(dom.children(inner)[0]), Some("a"));
        assert_eq!(layout.open_sections().collect::<Vec<_>>(), ["", "Inner"]);
    }

    #[test]
    fn section_divs_carry_style_class_and_localized_title() {
        let mut dom = Dom::new();
        let container = dom.create_element("form");
        let mut ctx = LayoutContext::new();
        ctx.bundle
            .insert("personalDetails".into(), "Persönliche Angaben".into());
        let mut layout = DivLayoutDecorator::with_config(
            SimpleLayout::new(),
            DivDecoratorConfig {
                style: Some("margin: 0".into()),
                style_class: Some("section".into()),
            },
        );

        lay_out(
            &mut layout,
            &mut dom,
            container,
            &[("a", Some("Personal Details"))],
            &ctx,
        );

        assert_eq!(
            dom.describe(dom.children(container)[0]),
            r#"div title="Persönliche Angaben" style="margin: 0" class="section""#
        );
    }

    #[test]
    fn nests_tables_inside_section_rows() {
        let mut dom = Dom::new();
        let container = dom.create_element("form");
        let ctx = LayoutContext::new();
        let mut layout = DivLayoutDecorator::new(TableLayout::default());

        layout.on_start_build(&ctx).unwrap();
        layout.start_container_layout(&mut dom, container, &ctx).unwrap();
        lay_out(
            &mut layout,
            &mut dom,
            container,
            &[("widget1", None), ("widget2", Some("Section"))],
            &ctx,
        );
        layout.end_container_layout(&mut dom, container, &ctx).unwrap();
        layout.on_end_build(&ctx).unwrap();

        assert_eq!(
            dom.outline(container),
            "\
form
  table
    tbody
      tr
        td colspan=\"2\"
          widget1
        td
      tr
        td colspan=\"2\"
          div title=\"Section\"
            table
              tbody
                tr
                  td colspan=\"2\"
                    widget2
                  td
        td
"
        );
    }
}
