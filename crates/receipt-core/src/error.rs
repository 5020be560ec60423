use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Failed to read layout config {}: {source}", path.display())]
    LayoutRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed layout config: {0}")]
    LayoutParse(#[source] serde_json::Error),

    #[error("Template image not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("Failed to decode template image {}: {reason}", path.display())]
    TemplateDecode { path: PathBuf, reason: String },

    #[error("Failed to load font {}: {reason}", path.display())]
    FontResource { path: PathBuf, reason: String },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Receipt store I/O error on {}: {source}", path.display())]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Receipt store {} is not valid JSON: {source}", path.display())]
    StoreCorruption {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
