//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

/// Default port for the page server.
pub const DEFAULT_PORT: u16 = 9474;

/// Server settings, read from flags or `PAGE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "page-server", version, about = "Publish and serve editor pages")]
pub struct ServerConfig {
    /// Port to listen on. The server always binds 127.0.0.1.
    #[arg(long, env = "PAGE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory for published pages. Pages are kept in memory only when unset.
    #[arg(long, env = "PAGE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Base URL used when reporting where a page was published.
    #[arg(long, env = "PAGE_PUBLIC_URL")]
    pub public_base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: None,
            public_base_url: None,
        }
    }
}

impl ServerConfig {
    /// Base URL of the public site, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        match &self.public_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.port),
        }
    }

    /// Public URL of the page published under `slug`.
    #[must_use]
    pub fn page_url(&self, slug: &str) -> String {
        format!("{}/s/{slug}", self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::parse_from(["page-server"]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.data_dir.is_none());
        assert_eq!(config.page_url("promo-ab12"), "http://localhost:9474/s/promo-ab12");
    }

    #[test]
    fn test_flags() {
        let config = ServerConfig::parse_from([
            "page-server",
            "--port",
            "8088",
            "--data-dir",
            "/tmp/pages",
            "--public-base-url",
            "https://pages.example.com/",
        ]);
        assert_eq!(config.port, 8088);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/pages")));
        assert_eq!(
            config.page_url("shop-x9z0"),
            "https://pages.example.com/s/shop-x9z0"
        );
    }
}
