//! Receipt rendering and storage
//!
//! This crate provides the core of the receipt generator:
//! - `layout`: per-field draw positions loaded from a JSON config
//! - `render`: overlays a record's fields onto a template image and encodes PNG
//! - `store`: append-only persistence of submitted records

pub mod error;
pub mod layout;
pub mod record;
pub mod render;
pub mod store;

pub use error::{ReceiptError, Result};
pub use layout::{FieldLayoutConfig, FieldLayoutEntry};
pub use record::{ReceiptField, ReceiptRecord};
pub use render::{encode_png, receipt_file_name, ReceiptRenderer};
pub use store::{JsonFileStore, ReceiptStore};
