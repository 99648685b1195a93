//! # Table Layout
//!
//! Lays fields out as rows of a table. Each field takes one column group
//! of three cells:
//!
//! ```text
//! th  (label)   td  (widget)   td  ("*" when required)
//! ```
//!
//! With `number_of_columns > 1` several groups pack into one row. A
//! `large` field spans every group left in its row, and the next field
//! starts a fresh row. A field without a label lets its widget cell absorb
//! the label cell.
//!
//! `start_container_layout` builds the `table` skeleton: an optional
//! `thead`/`tfoot` filled from the `header`/`footer` facets in the context,
//! then the `tbody` that rows go into. Table state is kept per container,
//! so one layout instance can fill several nested tables (one per section)
//! at once.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{apply_class, class_at, suffixed, Layout, LayoutResult};
use crate::context::LayoutContext;
use crate::dom::{Dom, DomError, NodeId};
use crate::model::Attributes;

/// Cells per column group: label, widget, required marker.
const CELLS_PER_COLUMN: usize = 3;

const LABEL_CELL: usize = 0;
const WIDGET_CELL: usize = 1;
const MARKER_CELL: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableLayoutConfig {
    pub table_style_class: Option<String>,
    /// Classes for the label, widget and required-marker cells of every
    /// column group.
    pub column_style_classes: Vec<Option<String>>,
    pub number_of_columns: usize,
    pub header_style_class: Option<String>,
    pub footer_style_class: Option<String>,
    pub label_suffix: String,
}

impl Default for TableLayoutConfig {
    fn default() -> Self {
        Self {
            table_style_class: None,
            column_style_classes: Vec::new(),
            number_of_columns: 1,
            header_style_class: None,
            footer_style_class: None,
            label_suffix: ":".to_string(),
        }
    }
}

/// Where the next field of one table goes.
#[derive(Debug, Clone, Copy)]
struct TableState {
    tbody: NodeId,
    row: Option<NodeId>,
    /// Column groups already used in `row`.
    column: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TableLayout {
    config: Arc<TableLayoutConfig>,
    tables: HashMap<NodeId, TableState>,
}

impl TableLayout {
    pub fn new(config: impl Into<Arc<TableLayoutConfig>>) -> Self {
        Self {
            config: config.into(),
            tables: HashMap::new(),
        }
    }

    pub fn config(&self) -> &TableLayoutConfig {
        &self.config
    }

    fn columns(&self) -> usize {
        self.config.number_of_columns.max(1)
    }

    fn start_table(
        &mut self,
        dom: &mut Dom,
        container: NodeId,
        ctx: &LayoutContext,
    ) -> Result<TableState, DomError> {
        let table = dom.create_element("table");
        // Ids name the form, so only its outermost table carries one.
        if let Some(path) = ctx.path_id().filter(|_| !inside_table(dom, container)) {
            dom.set_attribute(table, "id", &format!("table-{}", path))?;
        }
        apply_class(dom, table, self.config.table_style_class.as_deref())?;

        let facets = [
            ("header", "thead", self.config.header_style_class.as_deref()),
            ("footer", "tfoot", self.config.footer_style_class.as_deref()),
        ];
        for (name, tag, class) in facets {
            let Some(facet) = ctx.facet(dom, name) else {
                continue;
            };
            // Content moves out of the facet, so only the first table of a
            // build picks it up.
            let content = dom.children(facet).to_vec();
            if content.is_empty() {
                continue;
            }
            trace!(facet = name, "placing facet");

            let section = dom.create_element(tag);
            let tr = dom.create_element("tr");
            let td = dom.create_element("td");
            dom.set_attribute(td, "colspan", &(self.columns() * 2).to_string())?;
            apply_class(dom, td, class)?;
            for node in content {
                dom.append_child(td, node)?;
            }
            dom.append_child(tr, td)?;
            dom.append_child(section, tr)?;
            dom.append_child(table, section)?;
        }

        let tbody = dom.create_element("tbody");
        dom.append_child(table, tbody)?;
        dom.append_child(container, table)?;
        debug!(?container, ?table, "started table");

        let state = TableState {
            tbody,
            row: None,
            column: 0,
        };
        self.tables.insert(container, state);
        Ok(state)
    }
}

/// Whether `node` already sits somewhere inside a table.
fn inside_table(dom: &Dom, node: NodeId) -> bool {
    let mut cursor = dom.parent(node);
    while let Some(id) = cursor {
        if dom.tag(id) == Some("table") {
            return true;
        }
        cursor = dom.parent(id);
    }
    false
}

impl Layout for TableLayout {
    fn on_start_build(&mut self, _ctx: &LayoutContext) -> LayoutResult {
        self.tables.clear();
        Ok(())
    }

    fn start_container_layout(
        &mut self,
        dom: &mut Dom,
        container: NodeId,
        ctx: &LayoutContext,
    ) -> LayoutResult {
        self.start_table(dom, container, ctx).map(|_| ())
    }

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

        let columns = self.columns();
        let existing = self.tables.get(&container).copied();
        let mut state = match existing {
            Some(state) => state,
            None => self.start_table(dom, container, ctx)?,
        };
        let classes = &self.config.column_style_classes;
        let id_prefix = attrs
            .name
            .as_deref()
            .filter(|_| !attrs.root)
            .map(|name| ctx.id_prefix(name));
        let id = |suffix: &str| id_prefix.as_ref().map(|p| format!("table-{}-{}", p, suffix));

        // Row
        let row = match state.row {
            Some(row) if state.column < columns => row,
            _ => {
                let tr = dom.create_element("tr");
                if let Some(row_id) = id("row") {
                    dom.set_attribute(tr, "id", &row_id)?;
                }
                dom.append_child(state.tbody, tr)?;
                state.column = 0;
                tr
            }
        };

        // Label
        let label_text = ctx.label_text(attrs);
        let has_label = !label_text.is_empty();
        if has_label {
            let th = dom.create_element("th");
            if let Some(cell_id) = id("label-cell") {
                dom.set_attribute(th, "id", &cell_id)?;
            }
            apply_class(dom, th, class_at(classes, LABEL_CELL))?;

            let label = dom.create_element("label");
            if !attrs.root {
                if let Some(for_id) = dom.attribute(widget, "id").map(str::to_string) {
                    dom.set_attribute(label, "for", &for_id)?;
                }
            }
            if let Some(label_id) = id("label") {
                dom.set_attribute(label, "id", &label_id)?;
            }
            dom.set_text(label, &suffixed(&label_text, &self.config.label_suffix))?;
            dom.append_child(th, label)?;
            dom.append_child(row, th)?;
        }

        // Widget
        let spanned = if attrs.large {
            columns - state.column
        } else {
            1
        };
        let td = dom.create_element("td");
        if let Some(cell_id) = id("cell") {
            dom.set_attribute(td, "id", &cell_id)?;
        }
        apply_class(dom, td, class_at(classes, WIDGET_CELL))?;
        let colspan = spanned * CELLS_PER_COLUMN - 1 - usize::from(has_label);
        if colspan > 1 {
            dom.set_attribute(td, "colspan", &colspan.to_string())?;
        }
        dom.append_child(td, widget)?;
        dom.append_child(row, td)?;

        // Required marker
        let marker = dom.create_element("td");
        apply_class(dom, marker, class_at(classes, MARKER_CELL))?;
        if attrs.shows_required() {
            dom.set_text(marker, "*")?;
        }
        dom.append_child(row, marker)?;

        state.row = Some(row);
        state.column += spanned;
        self.tables.insert(container, state);
        Ok(())
    }

    fn end_container_layout(
        &mut self,
        _dom: &mut Dom,
        container: NodeId,
        _ctx: &LayoutContext,
    ) -> LayoutResult {
        self.tables.remove(&container);
        Ok(())
    }

    fn on_end_build(&mut self, _ctx: &LayoutContext) -> LayoutResult {
        self.tables.clear();
        Ok(())
    }
}
