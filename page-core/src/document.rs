//! Ordered element collections.

use std::collections::HashSet;

use crate::{Element, ElementId, PageError, PageResult};

/// The ordered elements of one page. Order is paint order: later elements
/// draw on top of earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document that passes [`Document::validate`].
    ///
    /// # Errors
    ///
    /// See [`Document::validate`].
    pub fn from_elements(elements: Vec<Element>) -> PageResult<Self> {
        let document = Self { elements };
        document.validate()?;
        Ok(document)
    }

    /// Build a document without checking ids.
    #[cfg(test)]
    pub(crate) fn from_elements_unchecked(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Check that ids are unique, positions are finite and style values
    /// are declaration-safe.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::DuplicateElementId`] naming the first repeated id,
    /// [`PageError::InvalidPosition`] for a non-finite position, or
    /// [`PageError::InvalidStyleValue`].
    pub fn validate(&self) -> PageResult<()> {
        let mut seen = HashSet::with_capacity(self.elements.len());
        for element in &self.elements {
            if !element.position.is_finite() {
                return Err(PageError::InvalidPosition {
                    id: element.id.to_string(),
                    x: element.position.x,
                    y: element.position.y,
                });
            }
            element.style.validate()?;
            if !seen.insert(&element.id) {
                return Err(PageError::DuplicateElementId(element.id.to_string()));
            }
        }
        Ok(())
    }

    /// Elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Iterate elements in paint order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Consume into the element list.
    #[must_use]
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the page has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Look up an element.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Whether an element with this id exists.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    /// A copy of this document with `element` appended on top.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::DuplicateElementId`] if the id is already used.
    pub fn with_element(&self, element: Element) -> PageResult<Self> {
        if self.contains(&element.id) {
            return Err(PageError::DuplicateElementId(element.id.to_string()));
        }
        let mut elements = self.elements.clone();
        elements.push(element);
        Ok(Self { elements })
    }

    /// A copy of this document with the element `id` rewritten by `edit`.
    ///
    /// Returns `None` when no such element exists. The id is restored after
    /// `edit` runs, so an edit cannot break uniqueness.
    #[must_use]
    pub fn with_updated<F>(&self, id: &ElementId, edit: F) -> Option<Self>
    where
        F: FnOnce(&mut Element),
    {
        let index = self.elements.iter().position(|e| &e.id == id)?;
        let mut elements = self.elements.clone();
        let element = &mut elements[index];
        edit(element);
        element.id = id.clone();
        Some(Self { elements })
    }

    /// A copy of this document without the element `id`, or `None` if absent.
    #[must_use]
    pub fn without(&self, id: &ElementId) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }
        let elements = self
            .elements
            .iter()
            .filter(|e| &e.id != id)
            .cloned()
            .collect();
        Some(Self { elements })
    }

    /// Move the element in place, used for uncommitted drag frames.
    pub(crate) fn set_position(&mut self, id: &ElementId, position: crate::Position) -> bool {
        match self.elements.iter_mut().find(|e| &e.id == id) {
            Some(element) => {
                element.position = position;
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementKind, Position};

    fn text(id: &str) -> Element {
        Element::new(ElementKind::Text)
            .with_id(ElementId::parse(id).expect("id"))
            .with_content(id)
    }

    #[test]
    fn test_from_elements_rejects_duplicates() {
        let result = Document::from_elements(vec![text("a"), text("b"), text("a")]);
        assert!(matches!(result, Err(PageError::DuplicateElementId(id)) if id == "a"));
    }

    #[test]
    fn test_with_element_preserves_order() {
        let doc = Document::from_elements(vec![text("a")]).expect("doc");
        let doc = doc.with_element(text("b")).expect("append");
        let ids: Vec<_> = doc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(doc.with_element(text("a")).is_err());
    }

    #[test]
    fn test_with_updated_leaves_original_untouched() {
        let doc = Document::from_elements(vec![text("a"), text("b")]).expect("doc");
        let id = ElementId::parse("b").expect("id");
        let updated = doc
            .with_updated(&id, |e| e.content = "changed".into())
            .expect("exists");

        assert_eq!(doc.get(&id).map(|e| e.content.as_str()), Some("b"));
        assert_eq!(updated.get(&id).map(|e| e.content.as_str()), Some("changed"));
    }

    #[test]
    fn test_with_updated_cannot_change_id() {
        let doc = Document::from_elements(vec![text("a"), text("b")]).expect("doc");
        let id = ElementId::parse("b").expect("id");
        let updated = doc
            .with_updated(&id, |e| e.id = ElementId::parse("a").expect("id"))
            .expect("exists");
        assert!(updated.validate().is_ok());
    }

    #[test]
    fn test_missing_targets_return_none() {
        let doc = Document::from_elements(vec![text("a")]).expect("doc");
        let ghost = ElementId::parse("ghost").expect("id");
        assert!(doc.with_updated(&ghost, |_| {}).is_none());
        assert!(doc.without(&ghost).is_none());
    }

    #[test]
    fn test_without_removes_exactly_one() {
        let doc = Document::from_elements(vec![text("a"), text("b"), text("c")]).expect("doc");
        let doc = doc.without(&ElementId::parse("b").expect("id")).expect("exists");
        let ids: Vec<_> = doc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_set_position() {
        let mut doc = Document::from_elements(vec![text("a")]).expect("doc");
        let id = ElementId::parse("a").expect("id");
        assert!(doc.set_position(&id, Position::new(5.0, 6.0)));
        assert_eq!(doc.get(&id).map(|e| e.position), Some(Position::new(5.0, 6.0)));
    }

    #[test]
    fn test_non_finite_position_is_invalid() {
        let stray = text("a").with_position(Position::new(f32::NAN, 0.0));
        let err = Document::from_elements(vec![stray]).expect_err("rejected");
        assert!(err.is_invalid_document());
        assert!(matches!(err, PageError::InvalidPosition { id, .. } if id == "a"));
    }
}
