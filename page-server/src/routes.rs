//! API route handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use page_core::{make_slug, PageDocument, PageRepository, StoreError};
use page_renderer::{render_document, ExportFormat, PageExporter, RenderMode};
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState};

/// Attempts at finding an unused slug before giving up.
const SLUG_ATTEMPTS: usize = 8;

/// Body of `POST /api/pages`.
#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    /// Site name the slug is derived from.
    pub name: String,
    /// Page to publish.
    pub document: PageDocument,
}

/// Where a page was published.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublishResponse {
    /// Slug the page is stored under.
    pub slug: String,
    /// Public URL of the page.
    pub url: String,
}

/// Query of the export endpoint.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// `html` (default) or `svg`.
    pub format: Option<String>,
}

/// Reject documents the editor could not load and normalize the rest.
fn validated(document: PageDocument) -> Result<PageDocument, ApiError> {
    let document = document.into_document()?;
    Ok(PageDocument::from_document(&document))
}

/// Publish a page under a fresh slug.
#[tracing::instrument(name = "publish_page", skip(state, request), fields(name = %request.name))]
pub async fn publish_page(
    State(state): State<AppState>,
    Json(request): Json<PublishRequest>,
) -> Result<(StatusCode, Json<PublishResponse>), ApiError> {
    let document = validated(request.document)?;

    for _ in 0..SLUG_ATTEMPTS {
        let slug = make_slug(&request.name);
        match state.store.insert_new(&slug, &request.name, &document) {
            Ok(()) => {
                tracing::info!(slug = %slug, elements = document.elements.len(), "Page published");
                let url = state.config.page_url(&slug);
                return Ok((StatusCode::CREATED, Json(PublishResponse { slug, url })));
            }
            Err(StoreError::SlugTaken(slug)) => {
                tracing::debug!(slug = %slug, "Slug collision, drawing another");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(ApiError::Internal("could not allocate a slug".to_string()))
}

/// Fetch the stored document for editing.
#[tracing::instrument(name = "get_page", skip(state))]
pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PageDocument>, ApiError> {
    Ok(Json(state.store.load(&slug)?))
}

/// Replace the document of an already published page.
#[tracing::instrument(name = "update_page", skip(state, document))]
pub async fn update_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(document): Json<PageDocument>,
) -> Result<Json<PublishResponse>, ApiError> {
    if !state.store.contains(&slug) {
        return Err(StoreError::PageNotFound(slug).into());
    }
    let document = validated(document)?;
    state.store.save(&slug, &document)?;
    tracing::debug!(slug = %slug, "Page updated");

    let url = state.config.page_url(&slug);
    Ok(Json(PublishResponse { slug, url }))
}

/// Export a published page as HTML or SVG.
#[tracing::instrument(name = "export_page", skip(state))]
pub async fn export_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = query.format.as_deref().unwrap_or("html").parse()?;
    let page = state.store.load(&slug)?;
    let output = render_document(&page, RenderMode::ReadOnly);
    let body = PageExporter::with_defaults().export(&output.tree, format);
    Ok(([(header::CONTENT_TYPE, format.content_type())], body).into_response())
}

/// Serve a published page read-only.
#[tracing::instrument(name = "public_page", skip(state))]
pub async fn public_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.store.page(&slug) {
        Ok(page) => {
            let output = render_document(&page.content, RenderMode::ReadOnly);
            if !output.warnings.is_empty() {
                tracing::warn!(
                    slug = %slug,
                    skipped = output.warnings.len(),
                    "Serving page with skipped elements"
                );
            }
            let title = if page.name.trim().is_empty() {
                slug.as_str()
            } else {
                page.name.as_str()
            };
            Html(PageExporter::with_defaults().render_page(title, &output.tree)).into_response()
        }
        Err(StoreError::PageNotFound(_)) => {
            (StatusCode::NOT_FOUND, Html(message_page("Site not found."))).into_response()
        }
        Err(err) => {
            tracing::error!(slug = %slug, error = %err, "Failed to load page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(message_page("Something went wrong.")),
            )
                .into_response()
        }
    }
}

fn message_page(message: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{message}</title></head>\
         <body style=\"font-family:sans-serif;text-align:center;padding:80px\">\
         <h1>{message}</h1></body></html>"
    )
}
