//! Page elements - the objects placed on the canvas.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::style::{Style, StyleAttribute};
use crate::{EditorConfig, PageError, PageResult};

/// Placeholder image shown for a freshly added image element.
pub const PLACEHOLDER_IMAGE: &str = "https://images.unsplash.com/photo-1649972904349-6e44c42644a7";

/// Default label of a new text element.
pub const DEFAULT_TEXT: &str = "New text";

/// Default label of a new button element.
pub const DEFAULT_BUTTON_LABEL: &str = "Click here";

/// Default link of a new button element.
pub const DEFAULT_BUTTON_LINK: &str = "#";

/// Unique identifier for an element.
///
/// Freshly created ids look like `el-<token>`. Ids loaded from a saved
/// document are kept verbatim, whatever their form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new unique element id.
    #[must_use]
    pub fn new() -> Self {
        Self(format!("el-{}", Uuid::new_v4().simple()))
    }

    /// Wrap an existing id.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::InvalidElementId`] if the id is blank.
    pub fn parse(id: impl Into<String>) -> PageResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PageError::InvalidElementId("id must not be empty".into()));
        }
        Ok(Self(id))
    }

    /// The id as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Styled text; `content` is the displayed text.
    Text,
    /// Picture; `content` is the image source URI.
    Image,
    /// Clickable label; `content` is the label, `link` the target.
    Button,
    /// Decorative rectangle; `content` is unused.
    Section,
}

impl ElementKind {
    /// All kinds.
    pub const ALL: [Self; 4] = [Self::Text, Self::Image, Self::Button, Self::Section];

    /// Tag used in serialized documents.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
            Self::Section => "section",
        }
    }

    /// Parse a serialized tag.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownElementKind`] for anything but the four tags.
    pub fn from_tag(tag: &str) -> PageResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| PageError::UnknownElementKind(tag.to_string()))
    }

    /// Whether `content` carries meaning for this kind.
    #[must_use]
    pub const fn has_content(self) -> bool {
        !matches!(self, Self::Section)
    }

    /// Whether `link` carries meaning for this kind.
    #[must_use]
    pub const fn has_link(self) -> bool {
        matches!(self, Self::Button)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Top-left anchored position in canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Pixels from the canvas left edge.
    pub x: f32,
    /// Pixels from the canvas top edge.
    pub y: f32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite. JSON has no encoding for
    /// infinities or NaN.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Where new elements are placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Position of the first element added to an empty page.
    pub origin: Position,
    /// Vertical offset applied per element already on the page.
    pub step: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            origin: Position::new(100.0, 100.0),
            step: 20.0,
        }
    }
}

impl Placement {
    /// Position for a new element on a page that already holds `existing` elements.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position_for(&self, existing: usize) -> Position {
        Position::new(self.origin.x, self.step.mul_add(existing as f32, self.origin.y))
    }
}

/// One placed object on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Element kind.
    pub kind: ElementKind,
    /// Text, image URI or button label depending on `kind`.
    pub content: String,
    /// Authored style; defaults are applied at render time.
    pub style: Style,
    /// Canvas position.
    pub position: Position,
    /// Navigation target, buttons only.
    pub link: Option<String>,
}

impl Element {
    /// Create a bare element with no content, style or link.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            content: String::new(),
            style: Style::new(),
            position: Position::default(),
            link: None,
        }
    }

    /// Create an element with the factory defaults for `kind`, placed so it
    /// does not sit exactly on top of the `existing` elements already there.
    #[must_use]
    pub fn create(kind: ElementKind, placement: &Placement, existing: usize) -> Self {
        let base = Self::new(kind).with_position(placement.position_for(existing));
        match kind {
            ElementKind::Text => base.with_content(DEFAULT_TEXT),
            ElementKind::Image => base
                .with_content(PLACEHOLDER_IMAGE)
                .with_style(
                    Style::new()
                        .with(StyleAttribute::Width, "200px")
                        .with(StyleAttribute::Height, "200px"),
                ),
            ElementKind::Button => base
                .with_content(DEFAULT_BUTTON_LABEL)
                .with_link(DEFAULT_BUTTON_LINK)
                .with_style(
                    Style::new()
                        .with(StyleAttribute::Color, "#ffffff")
                        .with(StyleAttribute::BackgroundColor, "#3B82F6")
                        .with(StyleAttribute::Padding, "12px 24px")
                        .with(StyleAttribute::BorderRadius, "8px"),
                ),
            ElementKind::Section => base.with_style(
                Style::new()
                    .with(StyleAttribute::BackgroundColor, "#f3f4f6")
                    .with(StyleAttribute::Width, "400px")
                    .with(StyleAttribute::Height, "300px"),
            ),
        }
    }

    /// Create an element using the placement from an editor configuration.
    #[must_use]
    pub fn create_with_config(kind: ElementKind, config: &EditorConfig, existing: usize) -> Self {
        Self::create(kind, &config.placement, existing)
    }

    /// Set the id.
    #[must_use]
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    /// Set the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}
