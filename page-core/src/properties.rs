//! Typed property edits.
//!
//! Every edit reads the live document, builds a new document with the
//! target element replaced and commits it. Edits against ids that are not
//! in the document, or that make no sense for the element kind, are logged
//! and ignored.

use crate::{
    Element, ElementId, ElementKind, HistoryStore, PageResult, Selection, StyleAttribute,
    StyleValue,
};

/// Mutation entry points over one history and selection.
///
/// Borrowed for the duration of a single edit; the editor session owns the
/// state.
#[derive(Debug)]
pub struct PropertyEditor<'a> {
    history: &'a mut HistoryStore,
    selection: &'a mut Selection,
}

impl<'a> PropertyEditor<'a> {
    /// Wrap the state an edit operates on.
    #[must_use]
    pub fn new(history: &'a mut HistoryStore, selection: &'a mut Selection) -> Self {
        Self { history, selection }
    }

    /// Select `id`, or clear the selection with `None`.
    ///
    /// Selecting an id that is not in the document clears the selection.
    pub fn select(&mut self, id: Option<&ElementId>) {
        match id {
            Some(id) if !self.history.current().contains(id) => {
                tracing::warn!(element = %id, "Select of unknown element clears selection");
                self.selection.clear();
            }
            id => self.selection.select(id.cloned()),
        }
    }

    /// Append `element` on top and select it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PageError::DuplicateElementId`] if the id is taken.
    pub fn add(&mut self, element: Element) -> PageResult<ElementId> {
        let id = element.id.clone();
        let kind = element.kind;
        let next = self.history.current().with_element(element)?;
        self.history.commit(next)?;
        self.selection.select(Some(id.clone()));
        tracing::debug!(element = %id, %kind, "Element added");
        Ok(id)
    }

    /// Replace the content of a Text, Image or Button.
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit.
    pub fn update_content(&mut self, id: &ElementId, content: &str) -> PageResult<bool> {
        self.edit(id, "content", ElementKind::has_content, |element| {
            element.content = content.to_string();
        })
    }

    /// Set or clear the link of a Button.
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit.
    pub fn update_link(&mut self, id: &ElementId, link: Option<&str>) -> PageResult<bool> {
        self.edit(id, "link", ElementKind::has_link, |element| {
            element.link = link.map(str::to_string);
        })
    }

    /// Merge one style attribute, keeping the others.
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit.
    pub fn update_style(
        &mut self,
        id: &ElementId,
        attribute: StyleAttribute,
        value: StyleValue,
    ) -> PageResult<bool> {
        if !value.is_declaration_safe() {
            tracing::warn!(element = %id, field = attribute.key(), "Unsafe style value ignored");
            return Ok(false);
        }
        self.edit(id, attribute.key(), |_| true, |element| {
            element.style.set(attribute, value);
        })
    }

    /// Remove one style attribute so its render-time default applies.
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit.
    pub fn clear_style(&mut self, id: &ElementId, attribute: StyleAttribute) -> PageResult<bool> {
        self.edit(id, attribute.key(), |_| true, |element| {
            element.style.unset(attribute);
        })
    }

    /// Remove an element, clearing the selection if it was selected.
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit.
    pub fn delete(&mut self, id: &ElementId) -> PageResult<bool> {
        let Some(next) = self.history.current().without(id) else {
            tracing::warn!(element = %id, "Delete of unknown element ignored");
            return Ok(false);
        };
        self.history.commit(next)?;
        if self.selection.is_selected(id) {
            self.selection.clear();
        }
        tracing::debug!(element = %id, "Element deleted");
        Ok(true)
    }

    fn edit<F>(
        &mut self,
        id: &ElementId,
        field: &str,
        allowed: fn(ElementKind) -> bool,
        apply: F,
    ) -> PageResult<bool>
    where
        F: FnOnce(&mut Element),
    {
        let Some(kind) = self.history.current().get(id).map(|e| e.kind) else {
            tracing::warn!(element = %id, field, "Edit of unknown element ignored");
            return Ok(false);
        };
        if !allowed(kind) {
            tracing::warn!(element = %id, %kind, field, "Edit not valid for element kind ignored");
            return Ok(false);
        }
        let Some(next) = self.history.current().with_updated(id, apply) else {
            return Ok(false);
        };
        self.history.commit(next)?;
        tracing::debug!(element = %id, field, "Element updated");
        Ok(true)
    }
}
