//! Serialized page representation shared by the editor, the store and the
//! public renderer.
//!
//! ```json
//! {"elements":[{"id":"el-1","type":"button","content":"Buy",
//!   "styles":{"backgroundColor":"#3B82F6"},"position":{"x":100,"y":120},
//!   "link":"https://example.com"}]}
//! ```
//!
//! Kind tags and style keys are kept as plain strings here so a document
//! written by a newer or older editor still parses. Conversion to the typed
//! model is where validation happens.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    Document, Element, ElementId, ElementKind, PageError, PageResult, Position, Style,
};

/// Document-friendly element description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDocument {
    /// Element identifier.
    pub id: String,
    /// Kind tag (`text`, `image`, `button`, `section`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Element content.
    #[serde(default)]
    pub content: String,
    /// Authored style keyed by camelCase attribute name.
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
    /// Canvas position.
    pub position: Position,
    /// Button link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl From<&Element> for ElementDocument {
    fn from(element: &Element) -> Self {
        Self {
            id: element.id.to_string(),
            kind: element.kind.tag().to_string(),
            content: element.content.clone(),
            styles: element.style.to_raw(),
            position: element.position,
            link: element.link.clone(),
        }
    }
}

impl ElementDocument {
    /// Convert to a typed element.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::InvalidElementId`], [`PageError::InvalidPosition`],
    /// [`PageError::UnknownElementKind`] or [`PageError::UnknownStyleAttribute`]
    /// for the first problem found.
    pub fn to_element(&self) -> PageResult<Element> {
        let id = ElementId::parse(self.id.clone())?;
        if !self.position.is_finite() {
            return Err(PageError::InvalidPosition {
                id: self.id.clone(),
                x: self.position.x,
                y: self.position.y,
            });
        }
        let kind = ElementKind::from_tag(&self.kind)?;
        let style = Style::from_raw(&self.styles)?;
        Ok(Element {
            id,
            kind,
            content: self.content.clone(),
            style,
            position: self.position,
            link: self.link.clone(),
        })
    }
}

/// An element dropped by [`PageDocument::into_elements_lossy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedElement {
    /// Index in the serialized element list.
    pub index: usize,
    /// Raw id as stored.
    pub id: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Canonical page document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    /// Elements in paint order.
    #[serde(default)]
    pub elements: Vec<ElementDocument>,
}

impl PageDocument {
    /// Build from a typed document.
    #[must_use]
    pub fn from_document(document: &Document) -> Self {
        Self {
            elements: document.iter().map(ElementDocument::from).collect(),
        }
    }

    /// Convert to a typed document, failing on the first invalid element.
    ///
    /// # Errors
    ///
    /// Returns the conversion error of the first bad element, or
    /// [`PageError::DuplicateElementId`] if ids repeat.
    pub fn into_document(self) -> PageResult<Document> {
        let elements = self
            .elements
            .iter()
            .map(ElementDocument::to_element)
            .collect::<PageResult<Vec<_>>>()?;
        Document::from_elements(elements)
    }

    /// Convert every element that can be converted, reporting the rest.
    ///
    /// Later elements reusing an id already seen are skipped too, so the
    /// returned list always satisfies the unique-id invariant.
    #[must_use]
    pub fn into_elements_lossy(self) -> (Vec<Element>, Vec<SkippedElement>) {
        let mut elements: Vec<Element> = Vec::with_capacity(self.elements.len());
        let mut skipped = Vec::new();
        for (index, raw) in self.elements.into_iter().enumerate() {
            let converted = raw.to_element().and_then(|element| {
                if elements.iter().any(|e| e.id == element.id) {
                    Err(PageError::DuplicateElementId(element.id.to_string()))
                } else {
                    Ok(element)
                }
            });
            match converted {
                Ok(element) => elements.push(element),
                Err(e) => skipped.push(SkippedElement {
                    index,
                    id: raw.id,
                    reason: e.to_string(),
                }),
            }
        }
        (elements, skipped)
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> PageResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON without validating elements.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Serialization`] if the JSON is malformed.
    pub fn from_json(json: &str) -> PageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&Document> for PageDocument {
    fn from(document: &Document) -> Self {
        Self::from_document(document)
    }
}

impl TryFrom<PageDocument> for Document {
    type Error = PageError;

    fn try_from(page: PageDocument) -> PageResult<Self> {
        page.into_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Placement, StyleAttribute};

    fn mixed_document() -> Document {
        let placement = Placement::default();
        let elements = ElementKind::ALL
            .into_iter()
            .enumerate()
            .map(|(i, kind)| Element::create(kind, &placement, i))
            .collect();
        Document::from_elements(elements).expect("doc")
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let mut document = mixed_document();
        let button_id = document.elements()[2].id.clone();
        document = document
            .with_updated(&button_id, |e| {
                e.link = Some(String::new());
                e.style.set(StyleAttribute::FontSize, "1.25rem");
                e.position = Position::new(12.5, -3.0);
            })
            .expect("exists");

        let json = PageDocument::from_document(&document).to_json().expect("json");
        let back = PageDocument::from_json(&json)
            .expect("parse")
            .into_document()
            .expect("valid");
        assert_eq!(back, document);
    }

    #[test]
    fn test_wire_shape() {
        let element = Element::new(ElementKind::Button)
            .with_id(ElementId::parse("el-1").expect("id"))
            .with_content("Go")
            .with_link("https://example.com")
            .with_position(Position::new(100.0, 120.0))
            .with_style(Style::new().with(StyleAttribute::BackgroundColor, "#3B82F6"));
        let document = Document::from_elements(vec![element]).expect("doc");

        let value: serde_json::Value =
            serde_json::to_value(PageDocument::from_document(&document)).expect("value");
        let first = &value["elements"][0];
        assert_eq!(first["type"], "button");
        assert_eq!(first["styles"]["backgroundColor"], "#3B82F6");
        assert_eq!(first["link"], "https://example.com");
        assert_eq!(first["position"]["y"], 120.0);
    }

    #[test]
    fn test_link_omitted_when_absent() {
        let document = Document::from_elements(vec![Element::new(ElementKind::Text)]).expect("doc");
        let json = PageDocument::from_document(&document).to_json().expect("json");
        assert!(!json.contains("link"));
    }

    #[test]
    fn test_strict_conversion_rejects_unknown_kind() {
        let page = PageDocument::from_json(
            r#"{"elements":[{"id":"a","type":"video","position":{"x":0,"y":0}}]}"#,
        )
        .expect("parse");
        assert!(matches!(
            page.into_document(),
            Err(PageError::UnknownElementKind(tag)) if tag == "video"
        ));
    }

    #[test]
    fn test_lossy_conversion_skips_bad_elements() {
        let page = PageDocument::from_json(
            r#"{"elements":[
                {"id":"a","type":"text","content":"ok","position":{"x":0,"y":0}},
                {"id":"b","type":"video","position":{"x":0,"y":0}},
                {"id":"c","type":"text","styles":{"zIndex":"3"},"position":{"x":0,"y":0}},
                {"id":"a","type":"image","position":{"x":0,"y":0}},
                {"id":"d","type":"section","position":{"x":5,"y":5}}
            ]}"#,
        )
        .expect("parse");

        let (elements, skipped) = page.into_elements_lossy();
        let ids: Vec<_> = elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
        let skipped_at: Vec<_> = skipped.iter().map(|s| (s.index, s.id.as_str())).collect();
        assert_eq!(skipped_at, vec![(1, "b"), (2, "c"), (3, "a")]);
    }

    #[test]
    fn test_overflowing_position_is_rejected() {
        // 1e39 overflows f32 and would be written back as null.
        let page = PageDocument::from_json(
            r#"{"elements":[
                {"id":"a","type":"text","position":{"x":1e39,"y":5}},
                {"id":"b","type":"text","position":{"x":1,"y":2}}
            ]}"#,
        )
        .expect("parse");

        assert!(matches!(
            page.clone().into_document(),
            Err(PageError::InvalidPosition { id, .. }) if id == "a"
        ));

        let (elements, skipped) = page.into_elements_lossy();
        assert_eq!(elements.len(), 1);
        assert_eq!(skipped[0].id, "a");
    }

    #[test]
    fn test_empty_document() {
        let page = PageDocument::from_json("{}").expect("parse");
        assert!(page.into_document().expect("valid").is_empty());
    }
}
