//! Server configuration from environment variables

use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// JSON mapping of field name to `{x, y, size}`
    pub layout_path: PathBuf,
    /// Blank receipt image the fields are drawn onto
    pub template_path: PathBuf,
    pub font_path: PathBuf,
    pub store_path: PathBuf,
    /// Served under `/static`
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str, default: &str| {
            lookup(key)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            layout_path: path("RECEIPT_LAYOUT_PATH", "receipt_config.json"),
            template_path: path("RECEIPT_TEMPLATE_PATH", "static/recibo_vacio.png"),
            font_path: path("RECEIPT_FONT_PATH", "arial.ttf"),
            store_path: path("RECEIPT_STORE_PATH", "receipts.json"),
            static_dir: path("STATIC_DIR", "static"),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
