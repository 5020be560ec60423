//! HTTP handlers for the receipt API

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Form, Json,
};
use chrono::Local;
use receipt_core::{receipt_file_name, ReceiptRecord};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::pages;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive filter applied to every field
    #[serde(default)]
    pub q: Option<String>,
}

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Empty submission form
pub async fn index() -> Html<String> {
    Html(pages::submission_form())
}

/// Render the submitted receipt, record it, and return the PNG
///
/// The record is appended only after rendering succeeds, and the image is
/// only returned once the record is stored.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Form(record): Form<ReceiptRecord>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ApiError> {
    let receipt_number = record.receipt_number.clone();

    let png = tokio::task::spawn_blocking(move || {
        let png = state.renderer.render(&record, &state.layout)?;
        state.store.append(record)?;
        Ok::<_, receipt_core::ReceiptError>(png)
    })
    .await??;

    let file_name = receipt_file_name(&Local::now());
    tracing::info!(
        "Generated receipt {} as {} ({} bytes)",
        receipt_number,
        file_name,
        png.len()
    );

    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "image/png".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        png,
    ))
}

/// Re-render the receipt stored at append position `index`
pub async fn receipt_image(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ApiError> {
    let png = tokio::task::spawn_blocking(move || {
        state
            .store
            .get(index)?
            .map(|record| state.renderer.render(&record, &state.layout))
            .transpose()
    })
    .await??
    .ok_or(ApiError::ReceiptNotFound(index))?;

    let file_name = format!("receipt_{}.png", index);
    tracing::info!("Re-rendered stored receipt #{} ({} bytes)", index, png.len());

    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "image/png".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        png,
    ))
}

/// HTML listing of stored receipts
pub async fn list_receipts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, ApiError> {
    let filter = query.q.unwrap_or_default();
    let query = filter.clone();
    let receipts =
        tokio::task::spawn_blocking(move || state.store.search_positions(&query)).await??;
    tracing::debug!("Listing {} receipts", receipts.len());
    Ok(Html(pages::receipt_listing(&receipts, &filter)))
}

/// Stored receipts as JSON
pub async fn list_receipts_json(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ReceiptRecord>>, ApiError> {
    let filter = query.q.unwrap_or_default();
    let receipts = tokio::task::spawn_blocking(move || state.store.search(&filter)).await??;
    tracing::debug!("Loaded {} receipts", receipts.len());
    Ok(Json(receipts))
}
