//! # Section Decorators
//!
//! Fields carry a `section` attribute naming the section they belong to,
//! as a comma-separated path (`"Contact,Address"`). The leaf layouts know
//! nothing about sections. A decorator wraps any [`Layout`], watches the
//! section path change from one field to the next, and injects structure
//! before handing the field on:
//!
//! - [`HeadingTagLayoutDecorator`] emits a heading for every newly entered
//!   section and otherwise leaves the flow flat.
//! - [`DivLayoutDecorator`] keeps a stack of open section divs and places
//!   each field inside the innermost one.
//!
//! Both diff consecutive paths the same way: keep the longest common
//! prefix, close what lies beyond it in the old path, and open what lies
//! beyond it in the new one. A field with no `section` attribute stays
//! where the previous field was.
//!
//! Hooks with nothing section-specific to do forward straight to the
//! delegate, so a decorator composes with any other layout.
//!
//! Section decorators also stack. When the delegate handles sections too,
//! the outer decorator takes only the outermost level of each path and
//! forwards the rest with that level blanked (`"A,B"` becomes `",B"`), so
//! every section is rendered exactly once and keeps its depth. The outer
//! decorator's own headings and divs are forwarded with `section = ""`,
//! which makes the delegate close its sections before placing them.
//!
//! [`Layout`]: crate::layout::Layout

pub mod heading;
pub mod nested;

pub use heading::{HeadingTagConfig, HeadingTagLayoutDecorator};
pub use nested::{DivDecoratorConfig, DivLayoutDecorator};

use std::borrow::Cow;

use crate::model::{Attributes, SectionPath};

/// Steps needed to move from the open sections to a new path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTransition<'a> {
    /// Depth both paths share.
    pub keep: usize,
    /// Sections to close, innermost first.
    pub close: usize,
    /// Sections to open, outermost first. The first one sits at depth
    /// `keep + 1`.
    pub open: &'a [String],
}

impl<'a> SectionTransition<'a> {
    pub fn between<S: AsRef<str>>(current: &[S], next: &'a SectionPath) -> Self {
        let keep = next.common_prefix_len(current);
        Self {
            keep,
            close: current.len() - keep,
            open: &next.segments()[keep..],
        }
    }

    pub fn is_noop(&self) -> bool {
        self.close == 0 && self.open.is_empty()
    }
}

/// Divide `path` between a decorator and its delegate. Returns the path
/// the decorator acts on and the attributes to forward with the field.
pub(crate) fn claim_sections<'a>(
    path: SectionPath,
    attrs: &'a Attributes,
    delegate_handles_sections: bool,
) -> (SectionPath, Cow<'a, Attributes>) {
    if !delegate_handles_sections {
        return (path, Cow::Borrowed(attrs));
    }
    let (outer, rest) = path.split_outermost();
    let mut forwarded = attrs.clone();
    forwarded.section = Some(rest.to_string());
    (outer, Cow::Owned(forwarded))
}

/// Attributes for a heading or section div handed to the delegate.
pub(crate) fn section_widget_attributes(delegate_handles_sections: bool) -> Attributes {
    let attrs = Attributes::section_widget();
    if delegate_handles_sections {
        attrs.with_section("")
    } else {
        attrs
    }
}
