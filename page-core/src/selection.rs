//! Single-element selection.

use crate::{Document, ElementId};

/// At most one selected element.
///
/// Selection is editor state only; it is never part of a history snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ElementId>,
}

impl Selection {
    /// Nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, or clear with `None`.
    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected = id;
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The selected id.
    #[must_use]
    pub fn get(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// Whether `id` is the selected element.
    #[must_use]
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Drop the selection if it points at an element missing from `document`.
    ///
    /// Undo can remove the selected element; the editor calls this after
    /// every history move so the selection never dangles.
    pub fn retain_in(&mut self, document: &Document) {
        if self
            .selected
            .as_ref()
            .is_some_and(|id| !document.contains(id))
        {
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Element, ElementKind};

    #[test]
    fn test_select_and_clear() {
        let mut selection = Selection::new();
        let id = ElementId::new();
        selection.select(Some(id.clone()));
        assert!(selection.is_selected(&id));
        selection.clear();
        assert!(selection.get().is_none());
    }

    #[test]
    fn test_retain_in_drops_missing() {
        let element = Element::new(ElementKind::Text);
        let document = Document::from_elements(vec![element.clone()]).expect("doc");

        let mut selection = Selection::new();
        selection.select(Some(element.id.clone()));
        selection.retain_in(&document);
        assert!(selection.is_selected(&element.id));

        selection.retain_in(&Document::new());
        assert!(selection.get().is_none());
    }
}
