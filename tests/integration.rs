//! Integration tests for the formnest layout pipeline.
//!
//! These tests exercise whole builds, from fields to the finished tree.
//! They verify:
//! - Leaf layouts place widgets in order
//! - Section decorators nest or flatten sections correctly
//! - Decorators compose with the table layout
//! - JSON form documents render to HTML end to end

use pretty_assertions::assert_eq;

use formnest::decorator::{DivLayoutDecorator, HeadingTagLayoutDecorator};
use formnest::layout::{SimpleLayout, TableLayout, TableLayoutConfig};
use formnest::{run_build, Attributes, Dom, FormDocument, Layout, LayoutContext, NodeId};

// ─── Helpers ────────────────────────────────────────────────────

/// The section input shared by the decorator scenarios. `None` leaves the
/// widget in whatever section the previous one opened, `Some("")` leaves
/// every section.
const SECTIONED: &[(&str, Option<&str>)] = &[
    ("w1", None),
    ("w2.1", Some("Section 1")),
    ("w2.2", None),
    ("w2.3.1", Some("Section 1,Section 1.1")),
    ("w3", Some("Section 2")),
    ("w4", Some("")),
    ("w5", None),
];

fn fields(dom: &mut Dom, spec: &[(&str, Option<&str>)]) -> Vec<(NodeId, Attributes)> {
    spec.iter()
        .map(|(tag, section)| {
            let widget = dom.create_element(tag);
            let attrs = match section {
                Some(section) => Attributes::new().with_section(section),
                None => Attributes::new(),
            };
            (widget, attrs)
        })
        .collect()
}

fn build_outline<L: Layout>(
    mut layout: L,
    spec: &[(&str, Option<&str>)],
    ctx: &LayoutContext,
) -> String {
    let mut dom = Dom::new();
    let container = dom.create_element("form");
    let fields = fields(&mut dom, spec);
    run_build(&mut layout, &mut dom, container, &fields, ctx).unwrap();
    dom.outline(container)
}

// ─── Leaf layouts ───────────────────────────────────────────────

#[test]
fn test_simple_layout_appends_in_order() {
    let outline = build_outline(
        SimpleLayout::new(),
        &[("w1", None), ("w2", None)],
        &LayoutContext::new(),
    );
    assert_eq!(outline, "form\n  w1\n  w2\n");
}

#[test]
fn test_empty_stub_is_never_placed() {
    let mut dom = Dom::new();
    let container = dom.create_element("form");
    let stub = dom.create_element("stub");
    let ctx = LayoutContext::new();
    let mut layout = SimpleLayout::new();

    for _ in 0..2 {
        layout
            .layout_widget(&mut dom, stub, &Attributes::new(), container, &ctx)
            .unwrap();
    }
    assert!(dom.children(container).is_empty());

    let child = dom.create_element("span");
    dom.append_child(stub, child).unwrap();
    layout
        .layout_widget(&mut dom, stub, &Attributes::new(), container, &ctx)
        .unwrap();
    assert_eq!(dom.children(container), &[stub]);
}

// ─── Section decorators ─────────────────────────────────────────

#[test]
fn test_div_decorator_nests_sections() {
    let outline = build_outline(
        DivLayoutDecorator::new(SimpleLayout::new()),
        SECTIONED,
        &LayoutContext::new(),
    );
    assert_eq!(
        outline,
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
}

#[test]
fn test_heading_decorator_flattens_sections() {
    let outline = build_outline(
        HeadingTagLayoutDecorator::new(SimpleLayout::new()),
        SECTIONED,
        &LayoutContext::new(),
    );
    assert_eq!(
        outline,
        r#"form
  w1
  h1
    "Section 1"
  w2.1
  w2.2
  h2
    "Section 1.1"
  w2.3.1
  h1
    "Section 2"
  w3
  w4
  w5
"#
    );
}

#[test]
fn test_stacked_div_decorators_match_a_single_one() {
    let ctx = LayoutContext::new();
    assert_eq!(
        build_outline(
            DivLayoutDecorator::new(DivLayoutDecorator::new(SimpleLayout::new())),
            SECTIONED,
            &ctx
        ),
        build_outline(DivLayoutDecorator::new(SimpleLayout::new()), SECTIONED, &ctx)
    );
}

#[test]
fn test_heading_decorator_over_div_decorator_mixes_styles() {
    let outline = build_outline(
        HeadingTagLayoutDecorator::new(DivLayoutDecorator::new(SimpleLayout::new())),
        SECTIONED,
        &LayoutContext::new(),
    );
    assert_eq!(
        outline,
        r#"form
  w1
  h1
    "Section 1"
  w2.1
  w2.2
  div title="Section 1.1"
    w2.3.1
  h1
    "Section 2"
  w3
  w4
  w5
"#
    );
}

#[test]
fn test_layout_chain_from_json_stacks_decorators() {
    let json = r#"{
        "layout": {
            "type": "headingTagDecorator",
            "delegate": {
                "type": "headingTagDecorator",
                "delegate": { "type": "simple" }
            }
        },
        "fields": [
            {
                "widget": { "tag": "input", "attributes": { "id": "street" } },
                "attributes": { "name": "street", "section": "Contact,Address" }
            }
        ]
    }"#;

    let outline = formnest::render_json_outline(json).unwrap();
    assert_eq!(
        outline,
        r#"form
  h1
    "Contact"
  h2
    "Address"
  input id="street"
"#
    );
}

#[test]
fn test_decorators_are_transparent_without_sections() {
    let plain = [("w1", None), ("w2", None), ("w3", None)];
    let ctx = LayoutContext::with_path("person");

    let expected = build_outline(TableLayout::default(), &plain, &ctx);
    assert_eq!(
        build_outline(HeadingTagLayoutDecorator::new(TableLayout::default()), &plain, &ctx),
        expected
    );
    assert_eq!(
        build_outline(DivLayoutDecorator::new(TableLayout::default()), &plain, &ctx),
        expected
    );
}

#[test]
fn test_section_titles_are_localized() {
    let mut ctx = LayoutContext::new();
    ctx.bundle.insert("section1".into(), "Abschnitt 1".into());

    let outline = build_outline(
        HeadingTagLayoutDecorator::new(SimpleLayout::new()),
        &[("w1", Some("Section 1"))],
        &ctx,
    );
    assert_eq!(
        outline,
        r#"form
  h1
    "Abschnitt 1"
  w1
"#
    );
}

#[test]
fn test_div_decorator_over_table_nests_tables() {
    let ctx = LayoutContext::with_path("person");
    let mut layout = DivLayoutDecorator::new(TableLayout::new(TableLayoutConfig {
        table_style_class: Some("form".into()),
        ..TableLayoutConfig::default()
    }));

    let mut dom = Dom::new();
    let container = dom.create_element("form");
    let name = dom.create_element("input");
    dom.set_attribute(name, "id", "name").unwrap();
    let street = dom.create_element("input");
    dom.set_attribute(street, "id", "street").unwrap();
    let fields = vec![
        (name, Attributes::named("name").with_required(true)),
        (street, Attributes::named("street").with_section("Address")),
    ];

    run_build(&mut layout, &mut dom, container, &fields, &ctx).unwrap();

    assert_eq!(
        dom.outline(container),
        r#"form
  table id="table-person" class="form"
    tbody
      tr id="table-personName-row"
        th id="table-personName-label-cell"
          label for="name" id="table-personName-label"
            "Name:"
        td id="table-personName-cell"
          input id="name"
        td
          "*"
      tr
        td colspan="2"
          div title="Address"
            table class="form"
              tbody
                tr id="table-personStreet-row"
                  th id="table-personStreet-label-cell"
                    label for="street" id="table-personStreet-label"
                      "Street:"
                  td id="table-personStreet-cell"
                    input id="street"
                  td
        td
"#
    );
}

// ─── JSON documents ─────────────────────────────────────────────

#[test]
fn test_render_json_to_html() {
    let json = r#"{
        "layout": {
            "type": "headingTagDecorator",
            "styleClass": "section",
            "delegate": {
                "type": "div",
                "divStyleClasses": ["field", "label", "control"],
                "labelRequiredStyleClass": "required"
            }
        },
        "fields": [
            {
                "widget": { "tag": "input", "attributes": { "id": "firstName" } },
                "attributes": { "name": "firstName", "required": "true" }
            },
            {
                "widget": { "tag": "input", "attributes": { "id": "email" } },
                "attributes": { "name": "email", "section": "Contact & Email" }
            }
        ]
    }"#;

    let html = formnest::render_json(json).unwrap();
    assert_eq!(
        html,
        concat!(
            "<form>",
            r#"<div class="field"><div class="label"><label for="firstName" class="required">First Name:</label></div>"#,
            r#"<div class="control"><input id="firstName"></div></div>"#,
            r#"<div class="field"><div class="control"><h1 class="section">Contact &amp; Email</h1></div></div>"#,
            r#"<div class="field"><div class="label"><label for="email">Email:</label></div>"#,
            r#"<div class="control"><input id="email"></div></div>"#,
            "</form>"
        )
    );
}

#[test]
fn test_document_facets_become_table_header_and_footer() {
    let doc: FormDocument = serde_json::from_str(
        r#"{
            "layout": { "type": "table", "headerStyleClass": "head" },
            "facets": [
                { "name": "header", "children": [ { "tag": "h3", "text": "Person" } ] },
                { "name": "footer", "children": [] }
            ],
            "fields": [
                {
                    "widget": { "tag": "input", "attributes": { "id": "age" } },
                    "attributes": { "name": "age", "_root": "true" }
                }
            ]
        }"#,
    )
    .unwrap();

    let rendered = doc.render().unwrap();
    assert_eq!(
        rendered.outline(),
        r#"form
  table
    thead
      tr
        td colspan="2" class="head"
          h3
            "Person"
    tbody
      tr
        th
          label
            "Age:"
        td
          input id="age"
        td
"#
    );
}

#[test]
fn test_invalid_documents_report_a_hint() {
    let err = formnest::render_json(r#"{"layout": {"type": "grid"}}"#).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Failed to parse form document"));
    assert!(message.contains("Hint:"));
}
