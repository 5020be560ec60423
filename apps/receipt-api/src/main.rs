//! Receipt API Server - renders and records receipts
//!
//! Provides endpoints for:
//! - The receipt submission form
//! - Rendering a submitted receipt onto the template image
//! - Listing stored receipts as HTML or JSON
//! - Downloading a stored receipt by its position

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

mod config;
mod error;
mod handlers;
mod pages;
mod state;


use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("receipt_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    // Initialize application state
    info!("Initializing receipt API...");
    let config = AppConfig::from_env();
    let state = Arc::new(AppState::new(&config)?);

    let app = router(state, &config.static_dir);

    let addr = config.bind_addr();
    info!("Starting receipt API on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Submission form and rendering
        .route("/", get(handlers::index))
        .route("/generate", post(handlers::generate))
        // Listings
        .route("/receipts", get(handlers::list_receipts))
        .route("/receipts/:index/image", get(handlers::receipt_image))
        .route("/api/receipts", get(handlers::list_receipts_json))
        // Static assets (template, stylesheet)
        .nest_service("/static", ServeDir::new(static_dir))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
