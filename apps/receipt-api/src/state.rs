//! Application state for the receipt API

use anyhow::{Context, Result};
use receipt_core::{FieldLayoutConfig, JsonFileStore, ReceiptRenderer, ReceiptStore};
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;

pub struct AppState {
    pub layout: FieldLayoutConfig,
    pub renderer: ReceiptRenderer,
    pub store: Arc<dyn ReceiptStore>,
}

impl AppState {
    /// Load the layout and check the template; either failing is fatal.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let layout = FieldLayoutConfig::from_file(&config.layout_path)
            .context("Failed to load receipt layout")?;
        let renderer = ReceiptRenderer::new(&config.template_path, &config.font_path)
            .context("Failed to initialize receipt renderer")?;

        info!(
            "Using template {} with font {}",
            renderer.template_path().display(),
            renderer.font_path().display()
        );
        let store = Arc::new(JsonFileStore::new(&config.store_path));
        info!("Receipt store: {}", store.path().display());

        Ok(Self::from_parts(layout, renderer, store))
    }

    pub fn from_parts(
        layout: FieldLayoutConfig,
        renderer: ReceiptRenderer,
        store: Arc<dyn ReceiptStore>,
    ) -> Self {
        Self {
            layout,
            renderer,
            store,
        }
    }
}
