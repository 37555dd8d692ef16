//! Renderer error types.

use page_core::PageError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The serialized page could not be read.
    #[error("Invalid page document: {0}")]
    Document(#[from] PageError),

    /// Requested export format is not supported.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}
