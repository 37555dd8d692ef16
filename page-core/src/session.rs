//! One editing session: history, selection and drag state for a single page.
//!
//! Independent sessions share nothing, so an editor and a side-by-side
//! preview can each own one.

use crate::{
    Document, DragController, EditorConfig, Element, ElementId, ElementKind, HistoryStore,
    PageDocument, PageRepository, PageResult, Point, PointerEvent, PointerPhase, PropertyEditor,
    Selection, StoreError, StyleAttribute, StyleValue,
};

/// The editor state for one page.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    history: HistoryStore,
    selection: Selection,
    drag: DragController,
    config: EditorConfig,
}

impl EditorSession {
    /// Start a session on an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session on `document`, which becomes history snapshot 0.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PageError::DuplicateElementId`] if ids repeat.
    pub fn open(document: Document, config: EditorConfig) -> PageResult<Self> {
        Ok(Self {
            history: HistoryStore::new(document)?,
            selection: Selection::new(),
            drag: DragController::new(),
            config,
        })
    }

    /// Replace the page and reset history, selection and any drag.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PageError::DuplicateElementId`] if ids repeat; the
    /// session is left unchanged.
    pub fn load(&mut self, document: Document) -> PageResult<()> {
        self.history.load(document)?;
        self.selection.clear();
        self.drag = DragController::new();
        Ok(())
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The live document.
    #[must_use]
    pub fn document(&self) -> &Document {
        self.history.current()
    }

    /// The history store.
    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// The selected element id.
    #[must_use]
    pub fn selected(&self) -> Option<&ElementId> {
        self.selection.get()
    }

    /// The drag controller.
    #[must_use]
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Whether undo would do anything now.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.drag.is_dragging() && self.history.can_undo()
    }

    /// Whether redo would do anything now.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.drag.is_dragging() && self.history.can_redo()
    }

    fn editor(&mut self) -> PropertyEditor<'_> {
        PropertyEditor::new(&mut self.history, &mut self.selection)
    }

    /// Create an element of `kind` with its factory defaults, add it on top
    /// and select it.
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit.
    pub fn add_element(&mut self, kind: ElementKind) -> PageResult<ElementId> {
        let element = Element::create_with_config(kind, &self.config, self.document().len());
        self.editor().add(element)
    }

    /// Add a prepared element on top and select it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PageError::DuplicateElementId`] if the id is taken.
    pub fn insert_element(&mut self, element: Element) -> PageResult<ElementId> {
        self.editor().add(element)
    }

    /// Select an element, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<&ElementId>) {
        self.editor().select(id);
    }

    /// See [`PropertyEditor::update_content`].
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit.
    pub fn update_content(&mut self, id: &ElementId, content: &str) -> PageResult<bool> {
        self.editor().update_content(id, content)
    }

    /// See [`PropertyEditor::update_link`].
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit.
    pub fn update_link(&mut self, id: &ElementId, link: Option<&str>) -> PageResult<bool> {
        self.editor().update_link(id, link)
    }

    /// See [`PropertyEditor::update_style`].
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit.
    pub fn update_style(
        &mut self,
        id: &ElementId,
        attribute: StyleAttribute,
        value: impl Into<StyleValue>,
    ) -> PageResult<bool> {
        self.editor().update_style(id, attribute, value.into())
    }

    /// See [`PropertyEditor::clear_style`].
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit.
    pub fn clear_style(&mut self, id: &ElementId, attribute: StyleAttribute) -> PageResult<bool> {
        self.editor().clear_style(id, attribute)
    }

    /// See [`PropertyEditor::delete`].
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit.
    pub fn delete_element(&mut self, id: &ElementId) -> PageResult<bool> {
        self.editor().delete(id)
    }

    /// Step back one history entry. Ignored during a drag.
    pub fn undo(&mut self) -> bool {
        if self.drag.is_dragging() {
            tracing::debug!("Undo ignored during drag");
            return false;
        }
        let moved = self.history.undo();
        self.selection.retain_in(self.history.current());
        moved
    }

    /// Step forward one history entry. Ignored during a drag.
    pub fn redo(&mut self) -> bool {
        if self.drag.is_dragging() {
            tracing::debug!("Redo ignored during drag");
            return false;
        }
        let moved = self.history.redo();
        self.selection.retain_in(self.history.current());
        moved
    }

    /// Pointer pressed over `target`: select it and start a drag.
    pub fn pointer_down(&mut self, target: &ElementId, x: f32, y: f32) -> bool {
        self.drag
            .pointer_down(&self.history, &mut self.selection, target, Point::new(x, y))
    }

    /// Pointer moved: reposition the dragged element, if any.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.drag.pointer_move(&mut self.history, Point::new(x, y))
    }

    /// Pointer released: end the drag with at most one commit.
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit.
    pub fn pointer_up(&mut self) -> PageResult<bool> {
        self.drag
            .pointer_up(&mut self.history, self.config.commit_zero_delta_drags)
    }

    /// Dispatch a pointer event. A `Down` with no target clears the selection.
    ///
    /// # Errors
    ///
    /// Propagates a rejected commit from `Up`.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> PageResult<bool> {
        let Point { x, y } = event.point;
        match (event.phase, &event.target) {
            (PointerPhase::Down, Some(target)) => Ok(self.pointer_down(target, x, y)),
            (PointerPhase::Down, None) => {
                if !self.drag.is_dragging() {
                    self.selection.clear();
                }
                Ok(false)
            }
            (PointerPhase::Move, _) => Ok(self.pointer_move(x, y)),
            (PointerPhase::Up, _) => self.pointer_up(),
        }
    }

    /// The live document in its serialized form.
    #[must_use]
    pub fn to_page_document(&self) -> PageDocument {
        PageDocument::from_document(self.document())
    }

    /// Hand the live document to `repository` under `slug`.
    ///
    /// The session itself is never modified, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns the repository's error unchanged.
    pub fn publish<R>(&self, repository: &R, slug: &str) -> Result<PageDocument, StoreError>
    where
        R: PageRepository + ?Sized,
    {
        let document = self.to_page_document();
        match repository.save(slug, &document) {
            Ok(()) => {
                tracing::debug!(slug, elements = document.elements.len(), "Page published");
                Ok(document)
            }
            Err(e) => {
                tracing::warn!(slug, error = %e, "Publish failed");
                Err(e)
            }
        }
    }
}
