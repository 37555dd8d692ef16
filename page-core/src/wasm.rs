//! WebAssembly bindings for page-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.

use wasm_bindgen::prelude::*;

use crate::{
    EditorConfig, EditorSession, ElementId, ElementKind, PageDocument, StyleAttribute,
};

/// Initialize the editor WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

/// Editor instance for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    session: EditorSession,
}

fn parse_id(id: &str) -> Result<ElementId, String> {
    ElementId::parse(id).map_err(|e| e.to_string())
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor on an empty page.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: EditorSession::new(),
        }
    }

    /// Create an editor on a serialized page document.
    ///
    /// # Errors
    ///
    /// Returns an error string if the JSON or the document is invalid.
    #[wasm_bindgen(js_name = fromDocumentJson)]
    pub fn from_document_json(json: &str) -> Result<WasmEditor, String> {
        let document = PageDocument::from_json(json)
            .and_then(PageDocument::into_document)
            .map_err(|e| e.to_string())?;
        let session =
            EditorSession::open(document, EditorConfig::default()).map_err(|e| e.to_string())?;
        Ok(Self { session })
    }

    /// Get the live page document as JSON.
    #[wasm_bindgen(js_name = documentJson)]
    #[must_use]
    pub fn document_json(&self) -> String {
        self.session.to_page_document().to_json().unwrap_or_default()
    }

    /// Add an element of the given kind tag and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown kind tag.
    #[wasm_bindgen(js_name = addElement)]
    pub fn add_element(&mut self, kind: &str) -> Result<String, String> {
        let kind = ElementKind::from_tag(kind).map_err(|e| e.to_string())?;
        let id = self.session.add_element(kind).map_err(|e| e.to_string())?;
        Ok(id.to_string())
    }

    /// Select an element, or clear the selection with `undefined`.
    ///
    /// # Errors
    ///
    /// Returns an error string for a blank id.
    pub fn select(&mut self, id: Option<String>) -> Result<(), String> {
        let id = id.as_deref().map(parse_id).transpose()?;
        self.session.select(id.as_ref());
        Ok(())
    }

    /// The selected element id.
    #[must_use]
    pub fn selected(&self) -> Option<String> {
        self.session.selected().map(ToString::to_string)
    }

    /// Replace an element's content.
    ///
    /// # Errors
    ///
    /// Returns an error string for a blank id.
    #[wasm_bindgen(js_name = updateContent)]
    pub fn update_content(&mut self, id: &str, content: &str) -> Result<bool, String> {
        let id = parse_id(id)?;
        self.session
            .update_content(&id, content)
            .map_err(|e| e.to_string())
    }

    /// Set or clear a button's link.
    ///
    /// # Errors
    ///
    /// Returns an error string for a blank id.
    #[wasm_bindgen(js_name = updateLink)]
    pub fn update_link(&mut self, id: &str, link: Option<String>) -> Result<bool, String> {
        let id = parse_id(id)?;
        self.session
            .update_link(&id, link.as_deref())
            .map_err(|e| e.to_string())
    }

    /// Set one style attribute by key (`backgroundColor` or `background-color`).
    ///
    /// # Errors
    ///
    /// Returns an error string for a blank id or unknown attribute.
    #[wasm_bindgen(js_name = updateStyle)]
    pub fn update_style(&mut self, id: &str, attribute: &str, value: &str) -> Result<bool, String> {
        let id = parse_id(id)?;
        let attribute = attribute
            .parse::<StyleAttribute>()
            .map_err(|e| e.to_string())?;
        self.session
            .update_style(&id, attribute, value)
            .map_err(|e| e.to_string())
    }

    /// Delete an element.
    ///
    /// # Errors
    ///
    /// Returns an error string for a blank id.
    #[wasm_bindgen(js_name = deleteElement)]
    pub fn delete_element(&mut self, id: &str) -> Result<bool, String> {
        let id = parse_id(id)?;
        self.session.delete_element(&id).map_err(|e| e.to_string())
    }

    /// Undo one step.
    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    /// Redo one step.
    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    /// Whether undo is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    /// Whether redo is available.
    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    /// Pointer pressed over an element.
    ///
    /// # Errors
    ///
    /// Returns an error string for a blank id.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, id: &str, x: f32, y: f32) -> Result<bool, String> {
        let id = parse_id(id)?;
        Ok(self.session.pointer_down(&id, x, y))
    }

    /// Pointer moved.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.session.pointer_move(x, y)
    }

    /// Pointer released.
    ///
    /// # Errors
    ///
    /// Returns an error string if the drag could not be committed.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> Result<bool, String> {
        self.session.pointer_up().map_err(|e| e.to_string())
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasm_editor_new_is_empty() {
        let editor = WasmEditor::new();
        assert!(!editor.can_undo());
        assert_eq!(editor.document_json(), r#"{"elements":[]}"#);
    }

    #[test]
    fn add_and_update_through_bindings() {
        let mut editor = WasmEditor::default();
        let id = editor.add_element("button").expect("add");
        assert_eq!(editor.selected(), Some(id.clone()));
        assert!(editor
            .update_style(&id, "font-size", "18px")
            .expect("style"));
        assert!(editor.update_link(&id, None).expect("link"));
        assert!(editor.document_json().contains("fontSize"));
        assert!(editor.add_element("video").is_err());
    }

    #[test]
    fn from_document_json_rejects_unknown_kind() {
        let json = r#"{"elements":[{"id":"a","type":"video","position":{"x":0,"y":0}}]}"#;
        assert!(WasmEditor::from_document_json(json).is_err());
    }

    #[test]
    fn drag_through_bindings() {
        let mut editor = WasmEditor::new();
        let id = editor.add_element("text").expect("add");
        assert!(editor.pointer_down(&id, 100.0, 100.0).expect("down"));
        assert!(editor.pointer_move(140.0, 160.0));
        assert!(editor.pointer_up().expect("up"));
        assert!(editor.document_json().contains(r#""x":140.0"#));
    }
}
