//! Causa Storage Layer
//!
//! Implements the `CaseStore` trait. The wired-in backend is an
//! in-process map with upsert-by-`case_id` semantics; a document
//! database adapter plugs in behind the same trait without touching
//! the pipeline.
//!
//! # Examples
//!
//! ```
//! use causa_store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! assert_eq!(store.len(), 0);
//! ```

#![warn(missing_docs)]

use async_trait::async_trait;
use causa_domain::{CaseRecord, CaseStore};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Internal lock was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Poisoned,

    /// Backend rejected the record
    #[error("Save failed for case '{case_id}': {detail}")]
    SaveFailed {
        /// Case the save was addressed to
        case_id: String,
        /// Backend error detail
        detail: String,
    },
}

/// In-process implementation of `CaseStore`
///
/// Keeps the latest record per `case_id`. Two saves under the same id
/// leave only the second record behind.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, CaseRecord>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored record by case id
    pub fn get(&self, case_id: &str) -> Option<CaseRecord> {
        self.records
            .lock()
            .ok()
            .and_then(|records| records.get(case_id).cloned())
    }

    /// Number of distinct cases stored
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CaseStore for MemoryStore {
    type Error = StoreError;

    async fn save(&self, case_id: &str, record: &CaseRecord) -> Result<(), Self::Error> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        records.insert(case_id.to_string(), record.clone());
        info!("Saved case '{}'", case_id);
        Ok(())
    }
}
