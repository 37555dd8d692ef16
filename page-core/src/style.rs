//! Visual style attributes attached to elements.
//!
//! Only attributes an author set are stored. Kind-specific defaults are
//! resolved by the renderer at paint time, so stored documents stay minimal.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PageError, PageResult};

/// A recognized style attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleAttribute {
    /// Foreground (text) color.
    Color,
    /// Fill color behind the element.
    BackgroundColor,
    /// Font size.
    FontSize,
    /// Font weight (`400`, `700`, ...).
    FontWeight,
    /// Horizontal text alignment.
    TextAlign,
    /// Inner spacing.
    Padding,
    /// Outer spacing.
    Margin,
    /// Corner rounding.
    BorderRadius,
    /// Box width.
    Width,
    /// Box height.
    Height,
}

impl StyleAttribute {
    /// All attributes, in wire order.
    pub const ALL: [Self; 10] = [
        Self::Color,
        Self::BackgroundColor,
        Self::FontSize,
        Self::FontWeight,
        Self::TextAlign,
        Self::Padding,
        Self::Margin,
        Self::BorderRadius,
        Self::Width,
        Self::Height,
    ];

    /// Key used in the serialized document (`backgroundColor`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::BackgroundColor => "backgroundColor",
            Self::FontSize => "fontSize",
            Self::FontWeight => "fontWeight",
            Self::TextAlign => "textAlign",
            Self::Padding => "padding",
            Self::Margin => "margin",
            Self::BorderRadius => "borderRadius",
            Self::Width => "width",
            Self::Height => "height",
        }
    }

    /// CSS property name (`background-color`).
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::BackgroundColor => "background-color",
            Self::FontSize => "font-size",
            Self::FontWeight => "font-weight",
            Self::TextAlign => "text-align",
            Self::Padding => "padding",
            Self::Margin => "margin",
            Self::BorderRadius => "border-radius",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

impl fmt::Display for StyleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StyleAttribute {
    type Err = PageError;

    /// Accepts both the document key and the CSS property name.
    fn from_str(s: &str) -> PageResult<Self> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.key() == s || attr.css_name() == s)
            .ok_or_else(|| PageError::UnknownStyleAttribute(s.to_string()))
    }
}

/// Unit of a numeric style length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// CSS pixels.
    Px,
    /// Relative to the element font size.
    Em,
    /// Relative to the root font size.
    Rem,
    /// Percentage of the containing box.
    Percent,
}

impl LengthUnit {
    /// Suffix as written in CSS.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Em => "em",
            Self::Rem => "rem",
            Self::Percent => "%",
        }
    }
}

/// A style value: a numeric length when the text is canonical, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Single number with a unit, e.g. `16px`.
    Length {
        /// Magnitude.
        value: f32,
        /// Unit.
        unit: LengthUnit,
    },
    /// Anything else: colors, keywords, shorthands like `12px 24px`.
    Raw(String),
}

impl StyleValue {
    /// Construct a pixel length.
    #[must_use]
    pub fn px(value: f32) -> Self {
        Self::Length {
            value,
            unit: LengthUnit::Px,
        }
    }

    /// Parse a value from its textual form.
    ///
    /// A length is only produced when formatting it back yields the same
    /// text; `16.0px` therefore stays raw so the stored text never changes.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        parse_length(text)
            .filter(|length| length.to_string() == text)
            .unwrap_or_else(|| Self::Raw(text.to_string()))
    }

    /// Whether the value stays inside a single CSS declaration.
    ///
    /// Declaration and block delimiters, newlines and other control
    /// characters are refused.
    #[must_use]
    pub fn is_declaration_safe(&self) -> bool {
        match self {
            Self::Length { .. } => true,
            Self::Raw(text) => !text
                .chars()
                .any(|c| matches!(c, ';' | '{' | '}') || c.is_control()),
        }
    }

    /// Pixel magnitude, if this is a `px` length.
    #[must_use]
    pub fn as_px(&self) -> Option<f32> {
        match self {
            Self::Length {
                value,
                unit: LengthUnit::Px,
            } => Some(*value),
            _ => None,
        }
    }
}

fn parse_length(text: &str) -> Option<StyleValue> {
    let (number, unit) = [
        LengthUnit::Rem,
        LengthUnit::Px,
        LengthUnit::Em,
        LengthUnit::Percent,
    ]
    .into_iter()
    .find_map(|unit| text.strip_suffix(unit.suffix()).map(|n| (n, unit)))?;
    let value: f32 = number.parse().ok()?;
    value.is_finite().then_some(StyleValue::Length { value, unit })
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { value, unit } => write!(f, "{value}{}", unit.suffix()),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for StyleValue {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl Serialize for StyleValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StyleValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::parse(&text))
    }
}

/// The authored style of one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<StyleAttribute, StyleValue>);

impl Style {
    /// Empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, attribute: StyleAttribute, value: impl Into<StyleValue>) -> Self {
        self.set(attribute, value);
        self
    }

    /// Merge a single attribute, keeping all others.
    pub fn set(&mut self, attribute: StyleAttribute, value: impl Into<StyleValue>) {
        self.0.insert(attribute, value.into());
    }

    /// Remove an attribute so the render-time default applies again.
    pub fn unset(&mut self, attribute: StyleAttribute) -> Option<StyleValue> {
        self.0.remove(&attribute)
    }

    /// Look up an attribute.
    #[must_use]
    pub fn get(&self, attribute: StyleAttribute) -> Option<&StyleValue> {
        self.0.get(&attribute)
    }

    /// First attribute whose value is not declaration-safe.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::InvalidStyleValue`] naming the attribute.
    pub fn validate(&self) -> PageResult<()> {
        match self.iter().find(|(_, value)| !value.is_declaration_safe()) {
            Some((attribute, value)) => Err(PageError::InvalidStyleValue {
                attribute: attribute.key().to_string(),
                value: value.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Iterate attributes in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleAttribute, &StyleValue)> {
        self.0.iter().map(|(attr, value)| (*attr, value))
    }

    /// Number of authored attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been authored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build from an untyped key/value map, rejecting unknown keys and
    /// unsafe values.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownStyleAttribute`] for the first key that is
    /// not a recognized attribute, or [`PageError::InvalidStyleValue`].
    pub fn from_raw<'a>(
        entries: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> PageResult<Self> {
        let mut style = Self::new();
        for (key, value) in entries {
            style.set(key.parse()?, value.as_str());
        }
        style.validate()?;
        Ok(style)
    }

    /// Flatten into an untyped key/value map.
    #[must_use]
    pub fn to_raw(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(attr, value)| (attr.key().to_string(), value.to_string()))
            .collect()
    }
}
