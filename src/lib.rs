//! # Formnest
//!
//! Section-aware form layout.
//!
//! A form arrives as a flat, ordered stream of widgets, each with a small
//! attribute map (`name`, `label`, `required`, `section`, ...). A layout
//! places every widget into a container element. Section decorators wrap a
//! layout and turn the `section` attribute into structure: headings for a
//! flat form, or nested containers for a grouped one.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]      Fields, attributes, section paths
//!       ↓
//!   [config]     Layout chain: decorators over a leaf layout
//!       ↓
//!   [build]      Fire the layout hooks over each field in order
//!       ↓
//!   [decorator]  Open and close sections
//!       ↓
//!   [layout]     Simple, div or table placement
//!       ↓
//!   [dom]        Element tree, serialized to HTML
//! ```
//!
//! Any number of decorators can be stacked, though a chain normally has
//! just one section decorator over one leaf layout.

pub mod build;
pub mod config;
pub mod context;
pub mod decorator;
pub mod dom;
pub mod error;
pub mod layout;
pub mod model;
pub mod text;

pub use build::{run_build, Rendered};
pub use config::LayoutSpec;
pub use context::LayoutContext;
pub use dom::{Dom, DomError, NodeId};
pub use error::FormnestError;
pub use layout::{Layout, LayoutResult};
pub use model::{Attributes, FormDocument, SectionPath};

/// Render a form document to a tree.
pub fn render(document: &FormDocument) -> Result<Rendered, FormnestError> {
    document.render()
}

/// Render a form document described as JSON to HTML.
pub fn render_json(json: &str) -> Result<String, FormnestError> {
    let document: FormDocument = serde_json::from_str(json)?;
    Ok(render(&document)?.to_html())
}

/// Render a form document described as JSON to the indented node outline.
pub fn render_json_outline(json: &str) -> Result<String, FormnestError> {
    let document: FormDocument = serde_json::from_str(json)?;
    Ok(render(&document)?.outline())
}
