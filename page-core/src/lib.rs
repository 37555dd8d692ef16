//! # Page Core
//!
//! Core logic of the free-form page editor: typed elements placed at
//! absolute positions, linear undo/redo over whole-document snapshots,
//! pointer dragging and property editing.
//! Compiles to WASM for the browser editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               EditorSession                 │
//! ├─────────────────────────────────────────────┤
//! │  DragController  │  PropertyEditor          │
//! │  - Idle/Dragging │  - content, link, style  │
//! │  - one commit    │  - add, delete, select   │
//! ├─────────────────────────────────────────────┤
//! │  HistoryStore                               │
//! │  - live Document + snapshots + cursor       │
//! ├─────────────────────────────────────────────┤
//! │  Element / Style     │  PageDocument (wire) │
//! └─────────────────────────────────────────────┘
//!                        │ publish
//!                        ▼
//!                  PageRepository
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod document;
pub mod drag;
pub mod element;
pub mod error;
pub mod event;
pub mod history;
pub mod properties;
pub mod schema;
pub mod selection;
pub mod session;
pub mod slug;
pub mod store;
pub mod style;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::EditorConfig;
pub use document::Document;
pub use drag::{DragController, DragGesture, DragState};
pub use element::{
    Element, ElementId, ElementKind, Placement, Position, DEFAULT_BUTTON_LABEL,
    DEFAULT_BUTTON_LINK, DEFAULT_TEXT, PLACEHOLDER_IMAGE,
};
pub use error::{PageError, PageResult};
pub use event::{Point, PointerEvent, PointerPhase};
pub use history::HistoryStore;
pub use properties::PropertyEditor;
pub use schema::{ElementDocument, PageDocument, SkippedElement};
pub use selection::Selection;
pub use session::EditorSession;
pub use slug::{make_slug, slug_base};
pub use store::{PageRepository, PageStore, StoreError, StoredPage};
pub use style::{LengthUnit, Style, StyleAttribute, StyleValue};

/// Page core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
