//! Error types for the receipt API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use receipt_core::ReceiptError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Receipt not found: {0}")]
    ReceiptNotFound(usize),

    #[error("Receipt error: {0}")]
    Receipt(#[from] ReceiptError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::ReceiptNotFound(index) => (
                StatusCode::NOT_FOUND,
                format!("Receipt not found: {}", index),
            ),
            ApiError::Receipt(e) => {
                tracing::error!("Receipt error: {}", e);
                let message = match e {
                    ReceiptError::TemplateMissing(_) | ReceiptError::TemplateDecode { .. } => {
                        "Receipt template unavailable"
                    }
                    ReceiptError::FontResource { .. } => "Receipt font unavailable",
                    ReceiptError::StoreCorruption { .. } => "Receipt store is corrupt",
                    ReceiptError::StoreIo { .. } => "Receipt store unavailable",
                    _ => "Internal error",
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            ApiError::Task(e) => {
                tracing::error!("Background task failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
