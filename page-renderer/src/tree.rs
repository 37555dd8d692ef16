//! The visual tree produced by [`crate::render`].

use page_core::{ElementId, ElementKind, Position, StyleAttribute};
use serde::Serialize;

use crate::style::ResolvedStyle;

/// Who is looking at the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Editable canvas: buttons select, nothing navigates.
    Edit,
    /// Preview and public page: buttons follow their link.
    ReadOnly,
}

/// What clicking a button does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ButtonAction {
    /// Select the element (edit mode).
    Select,
    /// Follow a link.
    Navigate {
        /// Link target.
        href: String,
        /// Open in a new browsing context.
        new_context: bool,
    },
    /// Do nothing (read-only button without a link).
    Inert,
}

/// The drawable content of one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "primitive", rename_all = "snake_case")]
pub enum Primitive {
    /// Styled text.
    Text {
        /// Text to draw.
        text: String,
    },
    /// Picture from a URI.
    Image {
        /// Image source.
        src: String,
    },
    /// Clickable label.
    Button {
        /// Label to draw.
        label: String,
        /// Click behavior.
        action: ButtonAction,
    },
    /// Plain filled rectangle.
    Rect,
}

/// One element as drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualNode {
    /// Source element id.
    pub id: ElementId,
    /// Source element kind.
    pub kind: ElementKind,
    /// Absolute offset from the canvas origin.
    pub position: Position,
    /// Fully resolved style.
    pub style: ResolvedStyle,
    /// Drawable content.
    pub primitive: Primitive,
}

/// Approximate width of one glyph relative to the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Line height relative to the font size.
const LINE_HEIGHT_RATIO: f32 = 1.5;

impl VisualNode {
    /// Whether two nodes look the same, ignoring button click behavior.
    #[must_use]
    pub fn looks_like(&self, other: &Self) -> bool {
        let same_content = match (&self.primitive, &other.primitive) {
            (Primitive::Button { label: a, .. }, Primitive::Button { label: b, .. }) => a == b,
            (a, b) => a == b,
        };
        same_content
            && self.id == other.id
            && self.kind == other.kind
            && self.position == other.position
            && self.style == other.style
    }

    /// Label or text drawn by this node, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.primitive {
            Primitive::Text { text } => Some(text),
            Primitive::Button { label, .. } => Some(label),
            Primitive::Image { .. } | Primitive::Rect => None,
        }
    }

    /// Click behavior if this is a button.
    #[must_use]
    pub fn action(&self) -> Option<&ButtonAction> {
        match &self.primitive {
            Primitive::Button { action, .. } => Some(action),
            _ => None,
        }
    }

    /// Estimated box size in pixels.
    ///
    /// Explicit `px` sizes are used as given. `auto` sizes are estimated from
    /// the text length, font size and padding.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size(&self) -> (f32, f32) {
        let font_size = self.style.px(StyleAttribute::FontSize).unwrap_or(16.0);
        let (pad_v, pad_h) = padding_px(&self.style);
        let chars = self.text().map_or(0, |t| t.chars().count()) as f32;

        let width = self.style.px(StyleAttribute::Width).unwrap_or_else(|| {
            (chars * font_size).mul_add(GLYPH_WIDTH_RATIO, 2.0 * pad_h)
        });
        let height = self.style.px(StyleAttribute::Height).unwrap_or_else(|| {
            font_size.mul_add(LINE_HEIGHT_RATIO, 2.0 * pad_v)
        });
        (width, height)
    }
}

/// Vertical and horizontal padding in pixels from a CSS shorthand.
fn padding_px(style: &ResolvedStyle) -> (f32, f32) {
    let text = style.get(StyleAttribute::Padding).to_string();
    let parts: Vec<f32> = text
        .split_whitespace()
        .filter_map(|part| part.strip_suffix("px"))
        .filter_map(|n| n.parse().ok())
        .collect();
    match parts.as_slice() {
        [all] => (*all, *all),
        [v, h, ..] => (*v, *h),
        [] => (0.0, 0.0),
    }
}

/// Selection affordances drawn over the editable canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    /// Selected element.
    pub target: ElementId,
    /// Top-left of the selection ring.
    pub position: Position,
    /// Ring size in pixels.
    pub size: (f32, f32),
    /// Whether a delete handle is shown at the ring's top-right corner.
    pub delete_handle: bool,
}

/// Ordered drawable output. Later nodes paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualTree {
    /// Mode this tree was rendered for.
    pub mode: RenderMode,
    /// Nodes in paint order.
    pub nodes: Vec<VisualNode>,
    /// Selection layer, editable canvas only.
    pub overlay: Option<Overlay>,
}

impl VisualTree {
    /// An empty tree.
    #[must_use]
    pub fn empty(mode: RenderMode) -> Self {
        Self {
            mode,
            nodes: Vec::new(),
            overlay: None,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing is drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by element id.
    #[must_use]
    pub fn node(&self, id: &ElementId) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Layer the selection ring and delete handle over `selected`.
    ///
    /// Only applies in edit mode and only when the element is in the tree.
    #[must_use]
    pub fn with_selection(mut self, selected: Option<&ElementId>) -> Self {
        self.overlay = match (self.mode, selected) {
            (RenderMode::Edit, Some(id)) => self.node(id).map(|node| Overlay {
                target: node.id.clone(),
                position: node.position,
                size: node.size(),
                delete_handle: true,
            }),
            _ => None,
        };
        self
    }

    /// Whether both trees draw the same thing, ignoring mode, click
    /// behavior and the selection layer.
    #[must_use]
    pub fn looks_like(&self, other: &Self) -> bool {
        self.nodes.len() == other.nodes.len()
            && self
                .nodes
                .iter()
                .zip(&other.nodes)
                .all(|(a, b)| a.looks_like(b))
    }

    /// Bottom-right corner of the drawn content.
    #[must_use]
    pub fn extent(&self) -> (f32, f32) {
        self.nodes.iter().fold((0.0f32, 0.0f32), |(w, h), node| {
            let (nw, nh) = node.size();
            (w.max(node.position.x + nw), h.max(node.position.y + nh))
        })
    }
}
