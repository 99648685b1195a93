//! Declarative layout chains.
//!
//! A chain is described by nested JSON objects tagged with `type`, the
//! outermost decorator first:
//!
//! ```json
//! {
//!   "type": "divDecorator",
//!   "styleClass": "section",
//!   "delegate": { "type": "table", "numberOfColumns": 2 }
//! }
//! ```
//!
//! Options sit beside `type`. Any option left out takes its default.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::decorator::{
    DivDecoratorConfig, DivLayoutDecorator, HeadingTagConfig, HeadingTagLayoutDecorator,
};
use crate::layout::{
    DivLayout, DivLayoutConfig, Layout, SimpleLayout, TableLayout, TableLayoutConfig,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayoutSpec {
    #[default]
    Simple,
    Div(DivLayoutConfig),
    Table(TableLayoutConfig),
    HeadingTagDecorator(DecoratorSpec<HeadingTagConfig>),
    DivDecorator(DecoratorSpec<DivDecoratorConfig>),
}

/// A decorator's own options plus the layout it wraps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoratorSpec<C> {
    pub delegate: Box<LayoutSpec>,
    #[serde(flatten)]
    pub config: C,
}

impl LayoutSpec {
    /// Instantiate the chain.
    pub fn build(&self) -> Box<dyn Layout> {
        match self {
            LayoutSpec::Simple => Box::new(SimpleLayout::new()),
            LayoutSpec::Div(config) => Box::new(DivLayout::new(config.clone())),
            LayoutSpec::Table(config) => Box::new(TableLayout::new(config.clone())),
            LayoutSpec::HeadingTagDecorator(spec) => {
                Box::new(HeadingTagLayoutDecorator::with_config(
                    spec.delegate.build(),
                    Arc::new(spec.config.clone()),
                ))
            }
            LayoutSpec::DivDecorator(spec) => Box::new(DivLayoutDecorator::with_config(
                spec.delegate.build(),
                Arc::new(spec.config.clone()),
            )),
        }
    }

    /// Name of each layer, outermost first, e.g. `divDecorator > table`.
    pub fn describe(&self) -> String {
        let mut names = Vec::new();
        let mut spec = self;
        loop {
            match spec {
                LayoutSpec::Simple => names.push("simple"),
                LayoutSpec::Div(_) => names.push("div"),
                LayoutSpec::Table(_) => names.push("table"),
                LayoutSpec::HeadingTagDecorator(d) => {
                    names.push("headingTagDecorator");
                    spec = &d.delegate;
                    continue;
                }
                LayoutSpec::DivDecorator(d) => {
                    names.push("divDecorator");
                    spec = &d.delegate;
                    continue;
                }
            }
            break;
        }
        names.join(" > ")
    }
}
