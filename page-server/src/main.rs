//! # Page Server
//!
//! Publishes editor pages and serves them read-only.
//! Binds to localhost only.

use std::net::SocketAddr;

use clap::Parser;
use page_core::PageStore;
use page_server::{router, AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,page_server=debug,tower_http=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,page_server=debug,tower_http=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = ServerConfig::parse();

    let store = match &config.data_dir {
        Some(dir) => {
            let store = PageStore::with_data_dir(dir)?;
            let loaded = store.load_all_pages()?;
            tracing::info!("Loaded {} pages from {}", loaded.len(), dir.display());
            store
        }
        None => {
            tracing::warn!("No data directory configured; pages are kept in memory only");
            PageStore::new()
        }
    };

    let port = config.port;
    let app = router(AppState::new(store, config));

    // Bind to localhost ONLY
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Page server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
