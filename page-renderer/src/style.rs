//! Render-time style resolution.
//!
//! Stored elements only carry what the author set. Everything else is
//! filled in here from per-kind defaults, so defaults can change without
//! rewriting saved pages.

use page_core::{Element, ElementKind, StyleAttribute, StyleValue};
use serde::Serialize;

/// Every style attribute with a concrete value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStyle {
    values: Vec<(StyleAttribute, StyleValue)>,
}

/// Default value of `attribute` for an element of `kind`.
#[must_use]
pub fn default_value(kind: ElementKind, attribute: StyleAttribute) -> StyleValue {
    use ElementKind::{Button, Image, Section, Text};
    use StyleAttribute::{
        BackgroundColor, BorderRadius, Color, FontSize, FontWeight, Height, Margin, Padding,
        TextAlign, Width,
    };

    let text = match (attribute, kind) {
        (Color, Button) => "#ffffff",
        (Color, _) => "#000000",
        (BackgroundColor, Button) => "#3B82F6",
        (BackgroundColor, Section) => "#f3f4f6",
        (BackgroundColor, _) => "transparent",
        (FontSize, Text) => "16px",
        (FontSize, _) => "14px",
        (FontWeight, _) => "400",
        (TextAlign, _) => "left",
        (Padding, Button) => "12px 24px",
        (Padding, Section) => "40px",
        (Padding | Margin, _) => "0px",
        (BorderRadius, Button) => "8px",
        (BorderRadius, Section) => "12px",
        (BorderRadius, _) => "0px",
        (Width | Height, Image) => "200px",
        (Width, Section) => "400px",
        (Height, Section) => "300px",
        (Width | Height, _) => "auto",
    };
    StyleValue::parse(text)
}

impl ResolvedStyle {
    /// Resolve the authored style of `element` against its kind defaults.
    ///
    /// Authored values that would break out of their declaration are
    /// replaced by the default.
    #[must_use]
    pub fn resolve(element: &Element) -> Self {
        let values = StyleAttribute::ALL
            .into_iter()
            .map(|attribute| {
                let value = element
                    .style
                    .get(attribute)
                    .filter(|value| value.is_declaration_safe())
                    .cloned()
                    .unwrap_or_else(|| default_value(element.kind, attribute));
                (attribute, value)
            })
            .collect();
        Self { values }
    }

    /// Value of one attribute.
    #[must_use]
    pub fn get(&self, attribute: StyleAttribute) -> &StyleValue {
        // `values` holds every attribute in declaration order.
        &self.values[attribute as usize].1
    }

    /// Pixel value of a length attribute, if it is one.
    #[must_use]
    pub fn px(&self, attribute: StyleAttribute) -> Option<f32> {
        self.get(attribute).as_px()
    }

    /// All attributes in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleAttribute, &StyleValue)> {
        self.values.iter().map(|(attribute, value)| (*attribute, value))
    }

    /// Inline CSS declarations, e.g. `color:#000000;font-size:16px`.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(attribute, value)| format!("{}:{value}", attribute.css_name()))
            .collect::<Vec<_>>()
            .join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_core::{Placement, Style};

    #[test]
    fn test_text_defaults() {
        let style = ResolvedStyle::resolve(&Element::new(ElementKind::Text));
        assert_eq!(style.get(StyleAttribute::Color).to_string(), "#000000");
        assert_eq!(style.px(StyleAttribute::FontSize), Some(16.0));
        assert_eq!(style.get(StyleAttribute::Width).to_string(), "auto");
        assert_eq!(style.get(StyleAttribute::BackgroundColor).to_string(), "transparent");
    }

    #[test]
    fn test_button_and_section_defaults() {
        let button = ResolvedStyle::resolve(&Element::new(ElementKind::Button));
        assert_eq!(button.get(StyleAttribute::Color).to_string(), "#ffffff");
        assert_eq!(button.get(StyleAttribute::Padding).to_string(), "12px 24px");
        assert_eq!(button.px(StyleAttribute::FontSize), Some(14.0));

        let section = ResolvedStyle::resolve(&Element::new(ElementKind::Section));
        assert_eq!(section.px(StyleAttribute::BorderRadius), Some(12.0));
        assert_eq!(section.px(StyleAttribute::Padding), Some(40.0));
        assert_eq!(section.px(StyleAttribute::Height), Some(300.0));
    }

    #[test]
    fn test_authored_values_win() {
        let element = Element::create(ElementKind::Image, &Placement::default(), 0)
            .with_style(Style::new().with(StyleAttribute::Width, "320px"));
        let style = ResolvedStyle::resolve(&element);
        assert_eq!(style.px(StyleAttribute::Width), Some(320.0));
        assert_eq!(style.px(StyleAttribute::Height), Some(200.0));
    }

    #[test]
    fn test_unsafe_authored_value_falls_back_to_default() {
        let mut element = Element::new(ElementKind::Text);
        element
            .style
            .set(StyleAttribute::Color, "red;position:fixed;top:0");
        let style = ResolvedStyle::resolve(&element);
        assert_eq!(style.get(StyleAttribute::Color).to_string(), "#000000");
        assert!(!style.to_css().contains("position"));
    }

    #[test]
    fn test_css_lists_every_attribute() {
        let css = ResolvedStyle::resolve(&Element::new(ElementKind::Section)).to_css();
        assert_eq!(css.split(';').count(), StyleAttribute::ALL.len());
        assert!(css.starts_with("color:#000000;background-color:#f3f4f6"));
    }
}
