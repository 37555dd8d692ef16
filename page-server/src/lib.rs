//! # Page Server Library
//!
//! HTTP boundary for published pages. Used by the `page-server` binary and
//! by the integration tests.
//!
//! ```text
//! POST /api/pages ─────────┐
//! GET|PUT /api/pages/{slug}┼──> PageStore (memory, optional data dir)
//! GET /s/{slug} ───────────┤
//! GET .../{slug}/export ───┴──> render_document(ReadOnly) ──> PageExporter
//! ```

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use page_core::PageStore;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod config;
pub mod error;
pub mod health;
pub mod routes;

pub use config::ServerConfig;
pub use error::ApiError;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Published pages.
    pub store: PageStore,
    /// Server settings.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create state over an existing store.
    #[must_use]
    pub fn new(store: PageStore, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Build a CORS layer that only allows localhost origins.
fn build_cors_layer(port: u16) -> CorsLayer {
    let localhost_origins = [
        format!("http://localhost:{port}"),
        format!("http://127.0.0.1:{port}"),
        // Editor dev servers
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:3000".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ];

    let origins: Vec<HeaderValue> = localhost_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Build the application router with tracing, request ids and CORS.
#[must_use]
pub fn router(state: AppState) -> Router {
    let port = state.config.port;
    Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/api/pages", post(routes::publish_page))
        .route(
            "/api/pages/{slug}",
            get(routes::get_page).put(routes::update_page),
        )
        .route("/api/pages/{slug}/export", get(routes::export_page))
        .route("/s/{slug}", get(routes::public_page))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(build_cors_layer(port))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
