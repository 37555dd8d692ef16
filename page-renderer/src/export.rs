//! Visual tree export to markup.
//!
//! HTML is what the preview modal and the public page serve. SVG is a
//! static snapshot suitable for thumbnails.

use std::fmt::Write;
use std::str::FromStr;

use page_core::StyleAttribute;

use crate::error::RenderError;
use crate::tree::{ButtonAction, Overlay, Primitive, RenderMode, VisualNode, VisualTree};
use crate::RendererConfig;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Absolute-positioned HTML fragment.
    Html,
    /// SVG vector graphics.
    Svg,
}

impl ExportFormat {
    /// MIME type of the output.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Html => "text/html; charset=utf-8",
            Self::Svg => "image/svg+xml",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "svg" => Ok(Self::Svg),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Turns a [`VisualTree`] into HTML or SVG text.
#[derive(Debug, Clone, Default)]
pub struct PageExporter {
    config: RendererConfig,
}

impl PageExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Export a tree to the specified format.
    #[must_use]
    pub fn export(&self, tree: &VisualTree, format: ExportFormat) -> String {
        match format {
            ExportFormat::Html => self.render_to_html(tree),
            ExportFormat::Svg => self.render_to_svg(tree),
        }
    }

    fn canvas_height(&self, tree: &VisualTree) -> f32 {
        tree.extent().1.max(self.config.min_canvas_height)
    }

    /// Render the canvas as an HTML fragment.
    ///
    /// Each element is wrapped in an absolutely positioned box. Buttons are
    /// links only in read-only mode with a non-empty link.
    #[must_use]
    pub fn render_to_html(&self, tree: &VisualTree) -> String {
        let mut html = String::with_capacity(4096);
        let _ = write!(
            html,
            "<div class=\"page-canvas\" style=\"position:relative;width:100%;min-height:{}px;background:{}\">",
            self.config.min_canvas_height,
            escape_xml(&self.config.background_color),
        );

        for node in &tree.nodes {
            let _ = write!(
                html,
                "<div data-element-id=\"{}\" style=\"position:absolute;left:{}px;top:{}px\">",
                escape_xml(node.id.as_str()),
                node.position.x,
                node.position.y,
            );
            render_node_html(&mut html, node);
            html.push_str("</div>");
        }

        if let (RenderMode::Edit, Some(overlay)) = (tree.mode, &tree.overlay) {
            render_overlay_html(&mut html, overlay);
        }

        html.push_str("</div>");
        html
    }

    /// Render a complete standalone HTML page, as served for a public site.
    #[must_use]
    pub fn render_page(&self, title: &str, tree: &VisualTree) -> String {
        format!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
             <title>{}</title></head><body style=\"margin:0\">{}</body></html>",
            escape_xml(title),
            self.render_to_html(tree),
        )
    }

    /// Render the canvas as an SVG string.
    #[must_use]
    pub fn render_to_svg(&self, tree: &VisualTree) -> String {
        let width = self.config.canvas_width.max(tree.extent().0);
        let height = self.canvas_height(tree);

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        );
        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape_xml(&self.config.background_color),
        );

        for node in &tree.nodes {
            render_node_svg(&mut svg, node);
        }

        if let (RenderMode::Edit, Some(overlay)) = (tree.mode, &tree.overlay) {
            let (w, h) = overlay.size;
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{w}\" height=\"{h}\" fill=\"none\" stroke=\"#3B82F6\" stroke-width=\"2\"/>",
                overlay.position.x, overlay.position.y,
            );
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render a single node's content as HTML.
fn render_node_html(html: &mut String, node: &VisualNode) {
    let css = escape_xml(&node.style.to_css());
    match &node.primitive {
        Primitive::Text { text } => {
            let _ = write!(html, "<div style=\"{css}\">{}</div>", escape_xml(text));
        }
        Primitive::Image { src } => {
            let _ = write!(
                html,
                "<img src=\"{}\" alt=\"\" style=\"display:block;object-fit:cover;{css}\">",
                escape_xml(src),
            );
        }
        Primitive::Button { label, action } => {
            let label = escape_xml(label);
            match action {
                ButtonAction::Navigate { href, new_context } => {
                    let target = if *new_context {
                        " target=\"_blank\" rel=\"noopener noreferrer\""
                    } else {
                        ""
                    };
                    let _ = write!(
                        html,
                        "<a href=\"{}\"{target} style=\"display:inline-block;text-decoration:none;{css}\">{label}</a>",
                        escape_xml(href),
                    );
                }
                ButtonAction::Inert => {
                    let _ = write!(
                        html,
                        "<span role=\"button\" aria-disabled=\"true\" style=\"display:inline-block;{css}\">{label}</span>",
                    );
                }
                ButtonAction::Select => {
                    let _ = write!(
                        html,
                        "<button type=\"button\" data-select=\"{}\" style=\"border:none;cursor:move;{css}\">{label}</button>",
                        escape_xml(node.id.as_str()),
                    );
                }
            }
        }
        Primitive::Rect => {
            let _ = write!(html, "<div style=\"{css}\"></div>");
        }
    }
}

fn render_overlay_html(html: &mut String, overlay: &Overlay) {
    let (w, h) = overlay.size;
    let id = escape_xml(overlay.target.as_str());
    let _ = write!(
        html,
        "<div class=\"selection-ring\" data-target=\"{id}\" style=\"position:absolute;left:{}px;top:{}px;width:{w}px;height:{h}px;outline:2px solid #3B82F6;pointer-events:none\"></div>",
        overlay.position.x, overlay.position.y,
    );
    if overlay.delete_handle {
        let _ = write!(
            html,
            "<button type=\"button\" class=\"delete-handle\" data-delete=\"{id}\" style=\"position:absolute;left:{}px;top:{}px\">&times;</button>",
            overlay.position.x + w,
            overlay.position.y,
        );
    }
}

/// Render a single node to SVG.
fn render_node_svg(svg: &mut String, node: &VisualNode) {
    let (x, y) = (node.position.x, node.position.y);
    let (width, height) = node.size();
    let fill = escape_xml(&node.style.get(StyleAttribute::BackgroundColor).to_string());
    let radius = node.style.px(StyleAttribute::BorderRadius).unwrap_or(0.0);

    match &node.primitive {
        Primitive::Text { text } => {
            if fill != "transparent" {
                let _ = write!(
                    svg,
                    "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" rx=\"{radius}\" fill=\"{fill}\"/>",
                );
            }
            render_text_svg(svg, node, text, x, y, width, height);
        }
        Primitive::Image { src } => {
            let _ = write!(
                svg,
                "<image x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" href=\"{}\" preserveAspectRatio=\"xMidYMid slice\"/>",
                escape_xml(src),
            );
        }
        Primitive::Button { label, action } => {
            let link = match action {
                ButtonAction::Navigate { href, .. } => Some(escape_xml(href)),
                ButtonAction::Select | ButtonAction::Inert => None,
            };
            if let Some(href) = &link {
                let _ = write!(svg, "<a href=\"{href}\" target=\"_blank\">");
            }
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" rx=\"{radius}\" fill=\"{fill}\"/>",
            );
            render_text_svg(svg, node, label, x, y, width, height);
            if link.is_some() {
                svg.push_str("</a>");
            }
        }
        Primitive::Rect => {
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" rx=\"{radius}\" fill=\"{fill}\"/>",
            );
        }
    }
}

fn render_text_svg(
    svg: &mut String,
    node: &VisualNode,
    text: &str,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) {
    let font_size = node.style.px(StyleAttribute::FontSize).unwrap_or(16.0);
    let color = escape_xml(&node.style.get(StyleAttribute::Color).to_string());
    let weight = escape_xml(&node.style.get(StyleAttribute::FontWeight).to_string());
    let (anchor, text_x) = match node.style.get(StyleAttribute::TextAlign).to_string().as_str() {
        "center" => ("middle", x + width / 2.0),
        "right" | "end" => ("end", x + width),
        _ => ("start", x),
    };
    let text_y = y + height / 2.0;
    let _ = write!(
        svg,
        "<text x=\"{text_x}\" y=\"{text_y}\" font-size=\"{font_size}\" font-weight=\"{weight}\" fill=\"{color}\" text-anchor=\"{anchor}\" dominant-baseline=\"middle\" font-family=\"sans-serif\">{}</text>",
        escape_xml(text),
    );
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
