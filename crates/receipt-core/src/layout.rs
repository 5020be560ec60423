//! Field layout configuration
//!
//! Maps a field name to the pixel anchor and font size used when drawing it.
//! The config is a JSON object loaded once at startup:
//!
//! ```json
//! { "date": { "x": 520, "y": 48, "size": 18 } }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ReceiptError, Result};
use crate::record::ReceiptField;

/// Draw position and font size for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FieldLayoutEntry {
    pub x: i32,
    pub y: i32,
    /// Font size in pixels per em
    pub size: u32,
}

impl FieldLayoutEntry {
    /// Used for any field the config does not mention
    pub const FALLBACK: FieldLayoutEntry = FieldLayoutEntry {
        x: 100,
        y: 100,
        size: 12,
    };

    pub fn new(x: i32, y: i32, size: u32) -> Self {
        Self { x, y, size }
    }
}

impl Default for FieldLayoutEntry {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Immutable mapping from field name to layout entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FieldLayoutConfig {
    entries: HashMap<String, FieldLayoutEntry>,
}

impl FieldLayoutConfig {
    /// Load the layout from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `LayoutRead` if the file cannot be read and `LayoutParse` if
    /// it is not a JSON object of `{x, y, size}` entries.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ReceiptError::LayoutRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_str(&content)?;
        tracing::info!(
            "Loaded layout for {} fields from {}",
            config.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse the layout from a JSON string
    pub fn from_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(ReceiptError::LayoutParse)
    }

    /// Add or replace an entry
    pub fn with_entry(mut self, name: impl Into<String>, entry: FieldLayoutEntry) -> Self {
        self.entries.insert(name.into(), entry);
        self
    }

    /// Configured entry for `name`, or [`FieldLayoutEntry::FALLBACK`]
    pub fn lookup(&self, name: &str) -> FieldLayoutEntry {
        self.entries.get(name).copied().unwrap_or_default()
    }

    pub fn lookup_field(&self, field: ReceiptField) -> FieldLayoutEntry {
        self.lookup(field.name())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_parse_layout() {
        let json = r#"{
            "date": {"x": 520, "y": 48, "size": 18},
            "receipt_number": {"x": 700, "y": 48, "size": 18},
            "received_from": {"x": 160, "y": 120, "size": 20}
        }"#;

        let layout = FieldLayoutConfig::from_str(json).unwrap();
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.lookup("date"), FieldLayoutEntry::new(520, 48, 18));
        assert_eq!(
            layout.lookup_field(ReceiptField::ReceivedFrom),
            FieldLayoutEntry::new(160, 120, 20)
        );
    }

    #[test]
    fn test_missing_field_falls_back() {
        let layout = FieldLayoutConfig::from_str(r#"{"date": {"x": 1, "y": 2, "size": 3}}"#)
            .unwrap();
        assert_eq!(
            layout.lookup_field(ReceiptField::Saldo),
            FieldLayoutEntry::new(100, 100, 12)
        );
        assert_eq!(FieldLayoutConfig::default().lookup("anything"), FieldLayoutEntry::FALLBACK);
    }

    #[test]
    fn test_negative_coordinates_are_accepted() {
        let layout = FieldLayoutConfig::from_str(r#"{"concept": {"x": -40, "y": -5, "size": 10}}"#)
            .unwrap();
        assert_eq!(layout.lookup("concept"), FieldLayoutEntry::new(-40, -5, 10));
    }

    #[test]
    fn test_malformed_layout_is_rejected() {
        let err = FieldLayoutConfig::from_str(r#"{"date": {"x": "left"}}"#).unwrap_err();
        assert!(matches!(err, ReceiptError::LayoutParse(_)));

        let err = FieldLayoutConfig::from_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ReceiptError::LayoutParse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"amount": {{"x": 300, "y": 210, "size": 24}}}}"#).unwrap();

        let layout = FieldLayoutConfig::from_file(file.path()).unwrap();
        assert_eq!(layout.lookup("amount"), FieldLayoutEntry::new(300, 210, 24));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FieldLayoutConfig::from_file(dir.path().join("receipt_config.json")).unwrap_err();
        assert!(matches!(err, ReceiptError::LayoutRead { .. }));
    }
}
