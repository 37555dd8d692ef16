//! Saved pages render exactly as they did in the editor.

use page_core::{
    Document, EditorSession, Element, ElementKind, PageDocument, PageRepository, PageStore,
    Placement, Position, StyleAttribute,
};
use page_renderer::{
    render, render_document, ButtonAction, ExportFormat, PageExporter, RenderMode,
};
use proptest::prelude::*;

fn reload(document: &Document) -> Document {
    let json = PageDocument::from_document(document).to_json().expect("serialize");
    PageDocument::from_json(&json)
        .expect("parse")
        .into_document()
        .expect("valid")
}

fn mixed_with_buttons() -> Document {
    let placement = Placement::default();
    let mut elements: Vec<Element> = ElementKind::ALL
        .into_iter()
        .enumerate()
        .map(|(i, kind)| Element::create(kind, &placement, i))
        .collect();
    elements.push(
        Element::create(ElementKind::Button, &placement, elements.len())
            .with_content("Empty link")
            .with_link(""),
    );
    elements.push(
        Element::create(ElementKind::Button, &placement, elements.len())
            .with_content("Docs")
            .with_link("https://example.com/docs"),
    );
    Document::from_elements(elements).expect("doc")
}

#[test]
fn test_round_trip_zero_one_and_many() {
    let one = Document::from_elements(vec![Element::create(
        ElementKind::Text,
        &Placement::default(),
        0,
    )])
    .expect("doc");

    for document in [Document::new(), one, mixed_with_buttons()] {
        let reloaded = reload(&document);
        for mode in [RenderMode::Edit, RenderMode::ReadOnly] {
            assert_eq!(render(&reloaded, mode), render(&document, mode));
        }
    }
}

#[test]
fn test_read_only_matches_edit_visuals() {
    let document = mixed_with_buttons();
    let edit = render(&document, RenderMode::Edit);
    let read_only = render(&reload(&document), RenderMode::ReadOnly);
    assert!(edit.looks_like(&read_only));
}

#[test]
fn test_buttons_navigate_only_read_only_with_link() {
    let document = mixed_with_buttons();
    let read_only = render(&reload(&document), RenderMode::ReadOnly);
    let actions: Vec<_> = read_only.nodes.iter().filter_map(|n| n.action()).collect();
    assert_eq!(
        actions,
        vec![
            &ButtonAction::Navigate {
                href: "#".into(),
                new_context: true
            },
            &ButtonAction::Inert,
            &ButtonAction::Navigate {
                href: "https://example.com/docs".into(),
                new_context: true
            },
        ]
    );

    let edit = render(&document, RenderMode::Edit);
    assert!(edit
        .nodes
        .iter()
        .filter_map(|n| n.action())
        .all(|a| *a == ButtonAction::Select));
}

#[test]
fn test_published_page_renders_like_editor() {
    let mut session = EditorSession::new();
    let button = session.add_element(ElementKind::Button).expect("add");
    session
        .update_style(&button, StyleAttribute::BorderRadius, "20px")
        .expect("style");
    session.pointer_down(&button, 105.0, 105.0);
    session.pointer_move(305.0, 255.0);
    session.pointer_up().expect("up");

    let store = PageStore::new();
    session.publish(&store, "promo-zz99").expect("publish");

    let stored = store.load("promo-zz99").expect("load");
    let output = render_document(&stored, RenderMode::ReadOnly);
    assert!(output.warnings.is_empty());
    assert!(output
        .tree
        .looks_like(&render(session.document(), RenderMode::Edit)));
    assert_eq!(
        output.tree.node(&button).map(|n| n.position),
        Some(Position::new(300.0, 250.0))
    );

    let html = PageExporter::with_defaults().export(&output.tree, ExportFormat::Html);
    assert!(html.contains("border-radius:20px"));
    assert!(html.contains("target=\"_blank\""));
}

fn arb_element() -> impl Strategy<Value = Element> {
    (
        prop_oneof![
            Just(ElementKind::Text),
            Just(ElementKind::Image),
            Just(ElementKind::Button),
            Just(ElementKind::Section),
        ],
        "[a-zA-Z0-9 <>&\"]{0,20}",
        proptest::option::of("[a-z:/.#]{0,12}"),
        -4000i16..4000,
        -4000i16..4000,
    )
        .prop_map(|(kind, content, link, x, y)| {
            let element = Element::new(kind)
                .with_content(content)
                .with_position(Position::new(f32::from(x) / 4.0, f32::from(y) / 4.0));
            match link {
                Some(link) if kind == ElementKind::Button => element.with_link(link),
                _ => element,
            }
        })
}

proptest! {
    #[test]
    fn prop_render_survives_serialization(
        elements in prop::collection::vec(arb_element(), 0..8)
    ) {
        let document = Document::from_elements(elements).expect("unique ids");
        let reloaded = reload(&document);
        for mode in [RenderMode::Edit, RenderMode::ReadOnly] {
            prop_assert_eq!(render(&reloaded, mode), render(&document, mode));
        }
    }
}
