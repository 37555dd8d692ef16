//! # Page Renderer
//!
//! One pure render function shared by the editable canvas, the preview
//! modal and the public page. The consumers differ only in [`RenderMode`]
//! and in whether the selection overlay is layered on top.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐    render()    ┌────────────┐   PageExporter   ┌──────────┐
//! │ [Element]    │ ─────────────> │ VisualTree │ ───────────────> │ HTML/SVG │
//! └──────────────┘                └────────────┘                  └──────────┘
//!        ^                               ^
//!        │ into_elements_lossy           │ with_selection (edit only)
//! ┌──────────────┐
//! │ PageDocument │  render_document(): malformed elements become warnings
//! └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod style;
pub mod tree;

pub use error::{RenderError, RenderResult};
pub use export::{ExportFormat, PageExporter};
pub use style::ResolvedStyle;
pub use tree::{ButtonAction, Overlay, Primitive, RenderMode, VisualNode, VisualTree};

use page_core::{Element, ElementId, ElementKind, PageDocument, SkippedElement};

/// Configuration for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Canvas width in pixels.
    pub canvas_width: f32,
    /// The canvas is never shorter than this.
    pub min_canvas_height: f32,
    /// Canvas background color.
    pub background_color: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1200.0,
            min_canvas_height: 800.0,
            background_color: "#ffffff".to_string(),
        }
    }
}

/// A recoverable problem found while rendering a stored page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderWarning {
    /// Index of the skipped element in the stored list.
    pub index: usize,
    /// Stored id of the skipped element.
    pub element_id: String,
    /// Why it was skipped.
    pub message: String,
}

impl From<SkippedElement> for RenderWarning {
    fn from(skipped: SkippedElement) -> Self {
        Self {
            index: skipped.index,
            element_id: skipped.id,
            message: skipped.reason,
        }
    }
}

/// Tree plus the warnings collected while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    /// What to draw.
    pub tree: VisualTree,
    /// Elements that could not be drawn.
    pub warnings: Vec<RenderWarning>,
}

/// Render elements in collection order.
///
/// Every kind uses the same positioning rule: an absolute offset from the
/// canvas origin. Overlaps are drawn as-is.
#[must_use]
pub fn render<'a, I>(elements: I, mode: RenderMode) -> VisualTree
where
    I: IntoIterator<Item = &'a Element>,
{
    VisualTree {
        mode,
        nodes: elements
            .into_iter()
            .map(|element| render_element(element, mode))
            .collect(),
        overlay: None,
    }
}

fn render_element(element: &Element, mode: RenderMode) -> VisualNode {
    let primitive = match element.kind {
        ElementKind::Text => Primitive::Text {
            text: element.content.clone(),
        },
        ElementKind::Image => Primitive::Image {
            src: element.content.clone(),
        },
        ElementKind::Button => Primitive::Button {
            label: element.content.clone(),
            action: button_action(element.link.as_deref(), mode),
        },
        ElementKind::Section => Primitive::Rect,
    };
    VisualNode {
        id: element.id.clone(),
        kind: element.kind,
        position: element.position,
        style: ResolvedStyle::resolve(element),
        primitive,
    }
}

/// URL schemes a read-only button may follow.
const NAVIGABLE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Whether `href` is a link a published page may follow: `http(s):`,
/// `mailto:`, a fragment or a relative reference.
#[must_use]
pub fn is_navigable_href(href: &str) -> bool {
    // Browsers drop ASCII tabs and newlines anywhere in a URL and trim
    // surrounding whitespace before reading the scheme.
    let cleaned: String = href
        .trim_matches(|c: char| c.is_ascii_whitespace() || c.is_ascii_control())
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    if cleaned.is_empty() {
        return false;
    }
    let scheme_end = cleaned.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(end) if cleaned[end..].starts_with(':') => {
            let scheme = cleaned[..end].to_ascii_lowercase();
            NAVIGABLE_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

fn button_action(link: Option<&str>, mode: RenderMode) -> ButtonAction {
    match (mode, link) {
        (RenderMode::Edit, _) => ButtonAction::Select,
        (RenderMode::ReadOnly, Some(href)) if is_navigable_href(href) => ButtonAction::Navigate {
            href: href.to_string(),
            new_context: true,
        },
        (RenderMode::ReadOnly, _) => ButtonAction::Inert,
    }
}

/// Render a stored page, skipping elements that can't be drawn.
///
/// One malformed element never blanks the page: it is left out of the tree,
/// logged and reported in [`RenderOutput::warnings`].
#[must_use]
pub fn render_document(page: &PageDocument, mode: RenderMode) -> RenderOutput {
    let (elements, skipped) = page.clone().into_elements_lossy();
    let warnings: Vec<RenderWarning> = skipped.into_iter().map(RenderWarning::from).collect();
    for warning in &warnings {
        tracing::warn!(
            index = warning.index,
            element = %warning.element_id,
            "Skipping element: {}",
            warning.message
        );
    }
    RenderOutput {
        tree: render(&elements, mode),
        warnings,
    }
}

/// Parse and render a stored page from JSON.
///
/// # Errors
///
/// Returns [`RenderError::Document`] if the JSON is not a page document at all.
/// Individual bad elements are reported as warnings instead.
pub fn render_json(json: &str, mode: RenderMode) -> RenderResult<RenderOutput> {
    let page = PageDocument::from_json(json)?;
    Ok(render_document(&page, mode))
}

/// Stateful front end used by long-lived canvases.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RendererConfig,
    frame_count: u64,
}

impl Renderer {
    /// Create a new renderer with the given configuration.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            frame_count: 0,
        }
    }

    /// Render a frame for the editable canvas, with the selection overlay.
    pub fn render_edit<'a, I>(&mut self, elements: I, selected: Option<&ElementId>) -> VisualTree
    where
        I: IntoIterator<Item = &'a Element>,
    {
        self.frame_count += 1;
        render(elements, RenderMode::Edit).with_selection(selected)
    }

    /// Render a frame for preview or public display.
    pub fn render_read_only<'a, I>(&mut self, elements: I) -> VisualTree
    where
        I: IntoIterator<Item = &'a Element>,
    {
        self.frame_count += 1;
        render(elements, RenderMode::ReadOnly)
    }

    /// Canvas height for `tree`: tall enough for the content, never below
    /// the configured minimum.
    #[must_use]
    pub fn canvas_height(&self, tree: &VisualTree) -> f32 {
        tree.extent().1.max(self.config.min_canvas_height)
    }

    /// Get the current frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_core::{Document, Placement, Position};

    fn mixed() -> Document {
        let placement = Placement::default();
        let elements = ElementKind::ALL
            .into_iter()
            .enumerate()
            .map(|(i, kind)| Element::create(kind, &placement, i))
            .collect();
        Document::from_elements(elements).expect("doc")
    }

    #[test]
    fn test_render_empty() {
        let tree = render(&Document::new(), RenderMode::ReadOnly);
        assert!(tree.is_empty());
        assert!(tree.overlay.is_none());
    }

    #[test]
    fn test_render_preserves_order_and_position() {
        let document = mixed();
        let tree = render(&document, RenderMode::Edit);
        let kinds: Vec<_> = tree.nodes.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, ElementKind::ALL.to_vec());
        assert_eq!(tree.nodes[3].position, Position::new(100.0, 160.0));
        assert_eq!(tree.nodes[3].primitive, Primitive::Rect);
    }

    #[test]
    fn test_button_actions_by_mode() {
        let with_link = Element::new(ElementKind::Button).with_link("https://example.com");
        let empty_link = Element::new(ElementKind::Button).with_link("");
        let no_link = Element::new(ElementKind::Button);
        let elements = [with_link, empty_link, no_link];

        let edit = render(&elements, RenderMode::Edit);
        assert!(edit
            .nodes
            .iter()
            .all(|n| n.action() == Some(&ButtonAction::Select)));

        let read_only = render(&elements, RenderMode::ReadOnly);
        assert_eq!(
            read_only.nodes[0].action(),
            Some(&ButtonAction::Navigate {
                href: "https://example.com".into(),
                new_context: true
            })
        );
        assert_eq!(read_only.nodes[1].action(), Some(&ButtonAction::Inert));
        assert_eq!(read_only.nodes[2].action(), Some(&ButtonAction::Inert));
        assert!(edit.looks_like(&read_only));
    }

    #[test]
    fn test_navigable_hrefs() {
        for href in [
            "https://example.com",
            "HTTP://example.com",
            "mailto:team@example.com",
            "#",
            "#pricing",
            "/about",
            "pricing.html",
            "?ref=promo",
        ] {
            assert!(is_navigable_href(href), "{href}");
        }
        for href in [
            "",
            "   ",
            "javascript:alert(1)",
            " JavaScript:alert(1)",
            "java\tscript:alert(1)",
            "data:text/html,<b>x</b>",
            "vbscript:msgbox",
        ] {
            assert!(!is_navigable_href(href), "{href:?}");
        }
    }

    #[test]
    fn test_script_links_render_inert() {
        let button =
            Element::new(ElementKind::Button).with_link("javascript:alert(document.cookie)");
        let read_only = render([&button], RenderMode::ReadOnly);
        assert_eq!(read_only.nodes[0].action(), Some(&ButtonAction::Inert));
    }

    #[test]
    fn test_overlay_only_in_edit_mode() {
        let document = mixed();
        let selected = document.elements()[1].id.clone();

        let edit = render(&document, RenderMode::Edit).with_selection(Some(&selected));
        let overlay = edit.overlay.expect("overlay");
        assert_eq!(overlay.target, selected);
        assert_eq!(overlay.size, (200.0, 200.0));
        assert!(overlay.delete_handle);

        let read_only = render(&document, RenderMode::ReadOnly).with_selection(Some(&selected));
        assert!(read_only.overlay.is_none());

        let ghost = ElementId::new();
        let edit = render(&document, RenderMode::Edit).with_selection(Some(&ghost));
        assert!(edit.overlay.is_none());
    }

    #[test]
    fn test_render_document_skips_bad_elements() {
        let output = render_json(
            r#"{"elements":[
                {"id":"a","type":"text","content":"Hi","position":{"x":1,"y":2}},
                {"id":"b","type":"carousel","position":{"x":0,"y":0}}
            ]}"#,
            RenderMode::ReadOnly,
        )
        .expect("render");

        assert_eq!(output.tree.len(), 1);
        assert_eq!(output.tree.nodes[0].text(), Some("Hi"));
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].element_id, "b");
        assert!(output.warnings[0].message.contains("carousel"));
    }

    #[test]
    fn test_render_json_rejects_non_documents() {
        assert!(matches!(
            render_json("[1,2,3]", RenderMode::Edit),
            Err(RenderError::Document(_))
        ));
    }

    #[test]
    fn test_renderer_counts_frames_and_sizes_canvas() {
        let mut renderer = Renderer::new(RendererConfig::default());
        let document = mixed();
        let tree = renderer.render_edit(&document, None);
        renderer.render_read_only(&document);
        assert_eq!(renderer.frame_count(), 2);
        assert!((renderer.canvas_height(&tree) - 800.0).abs() < f32::EPSILON);

        let low = Element::new(ElementKind::Section).with_position(Position::new(0.0, 900.0));
        let tree = renderer.render_read_only([&low]);
        assert!((renderer.canvas_height(&tree) - 1200.0).abs() < f32::EPSILON);
    }
}
