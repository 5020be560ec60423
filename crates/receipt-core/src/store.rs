//! Append-only receipt storage
//!
//! The JSON file store rewrites the whole sequence on every append. Appends
//! are serialized in-process and each rewrite goes through a temporary file
//! in the same directory that is synced and then renamed over the store, so
//! readers only ever see a complete sequence. Separate processes sharing one file are not coordinated.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tempfile::NamedTempFile;

use crate::error::{ReceiptError, Result};
use crate::record::ReceiptRecord;

/// Ordered, append-only collection of receipts
pub trait ReceiptStore: Send + Sync {
    /// Add `record` after every record already stored
    fn append(&self, record: ReceiptRecord) -> Result<()>;

    /// Every stored record, in append order
    fn list_all(&self) -> Result<Vec<ReceiptRecord>>;

    /// Record at append position `index`, if there is one
    fn get(&self, index: usize) -> Result<Option<ReceiptRecord>> {
        Ok(self.list_all()?.into_iter().nth(index))
    }

    /// Stored records matching `query` (see [`ReceiptRecord::matches`]), in append order
    fn search(&self, query: &str) -> Result<Vec<ReceiptRecord>> {
        Ok(self
            .search_positions(query)?
            .into_iter()
            .map(|(_, record)| record)
            .collect())
    }

    /// Like [`search`](Self::search), paired with each record's append position
    fn search_positions(&self, query: &str) -> Result<Vec<(usize, ReceiptRecord)>> {
        Ok(self
            .list_all()?
            .into_iter()
            .enumerate()
            .filter(|(_, record)| record.matches(query))
            .collect())
    }
}

/// Receipt store backed by a single JSON array file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<ReceiptRecord>> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No receipt store at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        serde_json::from_slice(&content).map_err(|source| ReceiptError::StoreCorruption {
            path: self.path.clone(),
            source,
        })
    }

    fn write_records(&self, records: &[ReceiptRecord]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let payload = serde_json::to_vec(records).map_err(|e| self.io_error(e.into()))?;

        // Data is synced before the rename so the store never points at a
        // partially written file.
        let staging = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        let mut file = staging.as_file();
        file.write_all(&payload).map_err(|e| self.io_error(e))?;
        file.sync_all().map_err(|e| self.io_error(e))?;
        staging
            .persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> ReceiptError {
        ReceiptError::StoreIo {
            path: self.path.clone(),
            source,
        }
    }
}

impl ReceiptStore for JsonFileStore {
    fn append(&self, record: ReceiptRecord) -> Result<()> {
        // The guard holds no data, so a poisoned lock is still usable.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut records = self.read_records()?;
        records.push(record);
        self.write_records(&records)?;

        tracing::info!(
            "Stored receipt #{} in {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<ReceiptRecord>> {
        self.read_records()
    }
}
