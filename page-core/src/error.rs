//! Error types for page operations.

use thiserror::Error;

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Errors that can occur in page operations.
#[derive(Debug, Error)]
pub enum PageError {
    /// Two elements in one document share an id.
    #[error("Invalid document: duplicate element id {0}")]
    DuplicateElementId(String),

    /// Element id is empty or otherwise unusable.
    #[error("Invalid element id: {0}")]
    InvalidElementId(String),

    /// Element kind tag is not one of text, image, button, section.
    #[error("Unknown element kind: {0}")]
    UnknownElementKind(String),

    /// Element position is not a finite number.
    #[error("Invalid position for element {id}: ({x}, {y})")]
    InvalidPosition {
        /// Offending element.
        id: String,
        /// Stored horizontal coordinate.
        x: f32,
        /// Stored vertical coordinate.
        y: f32,
    },

    /// Style value would escape its own CSS declaration.
    #[error("Invalid value for style attribute {attribute}: {value:?}")]
    InvalidStyleValue {
        /// Attribute key.
        attribute: String,
        /// Rejected value.
        value: String,
    },

    /// Style key is not a recognized attribute.
    #[error("Unknown style attribute: {0}")]
    UnknownStyleAttribute(String),

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PageError {
    /// Whether this error means the document violates its id invariant.
    #[must_use]
    pub fn is_invalid_document(&self) -> bool {
        matches!(
            self, Self::DuplicateElementId(_) | Self::InvalidElementId(_) | Self::InvalidPosition { .. }
        )
    }
}
