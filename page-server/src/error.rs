//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use page_core::{PageError, StoreError};
use page_renderer::RenderError;
use serde::Serialize;

/// Errors returned by the API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No page is stored under the slug.
    #[error("Page not found: {0}")]
    NotFound(String),
    /// The request body or query was rejected.
    #[error("Bad request: {0}")]
    BadRequest(String),
    /// The slug is already in use.
    #[error("Conflict: {0}")]
    Conflict(String),
    /// The store failed.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PageNotFound(slug) => Self::NotFound(slug),
            StoreError::InvalidDocument(e) => Self::BadRequest(e.to_string()),
            StoreError::SlugTaken(slug) => Self::Conflict(slug),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_status() {
        let missing: ApiError = StoreError::PageNotFound("x".into()).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let invalid: ApiError =
            StoreError::InvalidDocument(PageError::DuplicateElementId("a".into())).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let taken: ApiError = StoreError::SlugTaken("x".into()).into();
        assert_eq!(taken.status(), StatusCode::CONFLICT);

        let down: ApiError = StoreError::Unavailable("read-only".into()).into();
        assert_eq!(down.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unsupported_format_is_bad_request() {
        let err: ApiError = RenderError::UnsupportedFormat("pdf".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("pdf"));
    }
}
