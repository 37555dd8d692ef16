//! # Document history
//!
//! The [`HistoryStore`] owns the live document and a linear list of full
//! document snapshots with a cursor.
//!
//! ```text
//! snapshots: [ s0 ][ s1 ][ s2 ][ s3 ]
//!                         ^ cursor            live == s2
//!
//! commit(d):  [ s0 ][ s1 ][ s2 ][ d ]         s3 discarded
//!                               ^ cursor      live == d
//! ```
//!
//! [`HistoryStore::commit`] is the only way the live document changes in a
//! way that can be undone. The drag controller may stage uncommitted frames
//! on the live document; those are folded into one commit when the gesture
//! ends.

use crate::{Document, PageResult};

/// Live document plus linear undo/redo history.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    snapshots: Vec<Document>,
    cursor: usize,
    live: Document,
}

impl HistoryStore {
    /// Create a store whose history holds `initial` as snapshot 0.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PageError::DuplicateElementId`] if `initial` has repeated ids.
    pub fn new(initial: Document) -> PageResult<Self> {
        initial.validate()?;
        Ok(Self {
            snapshots: vec![initial.clone()],
            cursor: 0,
            live: initial,
        })
    }

    /// Replace the document and reset history to a single snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PageError::DuplicateElementId`] if `initial` has repeated
    /// ids; the store is left unchanged.
    pub fn load(&mut self, initial: Document) -> PageResult<()> {
        initial.validate()?;
        tracing::debug!(elements = initial.len(), "History reset by load");
        self.snapshots = vec![initial.clone()];
        self.cursor = 0;
        self.live = initial;
        Ok(())
    }

    /// Record `next` as the new current snapshot.
    ///
    /// Snapshots after the cursor are discarded first, so a fresh edit
    /// always ends redo.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PageError::DuplicateElementId`] if `next` has repeated
    /// ids; the store is left unchanged.
    pub fn commit(&mut self, next: Document) -> PageResult<()> {
        next.validate()?;
        let discarded = self.snapshots.len() - (self.cursor + 1);
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(next.clone());
        self.cursor = self.snapshots.len() - 1;
        self.live = next;
        tracing::debug!(
            cursor = self.cursor,
            discarded,
            elements = self.live.len(),
            "Committed snapshot"
        );
        Ok(())
    }

    /// Step back one snapshot. Returns `false` at the first snapshot.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.live = self.snapshots[self.cursor].clone();
        tracing::debug!(cursor = self.cursor, "Undo");
        true
    }

    /// Step forward one snapshot. Returns `false` at the last snapshot.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.snapshots.len() {
            return false;
        }
        self.cursor += 1;
        self.live = self.snapshots[self.cursor].clone();
        tracing::debug!(cursor = self.cursor, "Redo");
        true
    }

    /// The live document.
    #[must_use]
    pub fn current(&self) -> &Document {
        &self.live
    }

    /// Whether [`Self::undo`] would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether [`Self::redo`] would do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Index of the current snapshot.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots, including the initial one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`; history holds at least the initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots, oldest first.
    #[must_use]
    pub fn snapshots(&self) -> &[Document] {
        &self.snapshots
    }

    /// Whether the live document differs from the current snapshot.
    #[must_use]
    pub fn has_staged_changes(&self) -> bool {
        self.live != self.snapshots[self.cursor]
    }

    /// Mutable access to the live document without recording a snapshot.
    pub(crate) fn stage(&mut self) -> &mut Document {
        &mut self.live
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self {
            snapshots: vec![Document::new()],
            cursor: 0,
            live: Document::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Element, ElementKind, PageError};

    fn doc_with(count: usize) -> Document {
        let elements = (0..count).map(|_| Element::new(ElementKind::Text)).collect();
        Document::from_elements(elements).expect("unique ids")
    }

    #[test]
    fn test_new_has_single_snapshot() {
        let store = HistoryStore::new(doc_with(2)).expect("store");
        assert_eq!(store.len(), 1);
        assert_eq!(store.cursor(), 0);
        assert_eq!(store.current().len(), 2);
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_undo_redo_at_bounds_are_noops() {
        let mut store = HistoryStore::default();
        assert!(!store.undo());
        assert!(!store.redo());
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn test_commit_truncates_redo_branch() {
        let mut store = HistoryStore::default();
        let d1 = doc_with(1);
        let d2 = doc_with(2);
        let d3 = doc_with(3);

        store.commit(d1.clone()).expect("commit");
        store.commit(d2).expect("commit");
        assert!(store.undo());
        assert!(store.can_redo());

        store.commit(d3.clone()).expect("commit");
        assert!(!store.can_redo());
        assert_eq!(store.len(), 3);
        assert_eq!(store.snapshots()[1], d1);
        assert_eq!(store.snapshots()[2], d3);
        assert_eq!(store.current(), &d3);
    }

    #[test]
    fn test_commit_rejects_duplicate_ids_and_keeps_state() {
        let mut store = HistoryStore::default();
        let element = Element::new(ElementKind::Text);
        let bad = Document::from_elements_unchecked(vec![element.clone(), element]);

        let result = store.commit(bad);
        assert!(matches!(result, Err(PageError::DuplicateElementId(_))));
        assert_eq!(store.len(), 1);
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_load_resets_history() {
        let mut store = HistoryStore::default();
        store.commit(doc_with(1)).expect("commit");
        store.commit(doc_with(2)).expect("commit");

        let loaded = doc_with(4);
        store.load(loaded.clone()).expect("load");
        assert_eq!(store.len(), 1);
        assert_eq!(store.cursor(), 0);
        assert_eq!(store.current(), &loaded);
    }

    #[test]
    fn test_staged_changes_do_not_touch_history() {
        let mut store = HistoryStore::new(doc_with(1)).expect("store");
        let id = store.current().elements()[0].id.clone();
        store
            .stage()
            .set_position(&id, crate::Position::new(42.0, 7.0));

        assert!(store.has_staged_changes());
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.snapshots()[0].get(&id).map(|e| e.position),
            Some(crate::Position::default())
        );
    }
}
