//! Tuning History Storage
//!
//! Persistent storage for `TuningRecord`s. The `TuningLog` trait
//! abstracts the backend so different stores can be swapped without
//! touching session code:
//! - `TuningHistory`: durable sled store
//! - `InMemoryLog`: in-memory store for testing and minimal deployments
//!
//! The core only reads and writes field values; transport, schema
//! evolution and auth live outside this crate.

mod history;

pub use history::{HistoryStats, TuningHistory};

use crate::types::TuningRecord;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Other(String),
}

/// Trait for pluggable history backends
///
/// Implementations must be thread-safe (Send + Sync) for shared access.
pub trait TuningLog: Send + Sync {
    /// Store a record, returning its assigned opaque id
    fn insert(&self, record: &TuningRecord) -> Result<u64, StorageError>;

    /// Get a record by id
    fn get(&self, id: u64) -> Result<Option<TuningRecord>, StorageError>;

    /// List the most recent records, newest first
    fn recent(&self, limit: usize) -> Result<Vec<TuningRecord>, StorageError>;

    /// Delete by id; false when the id was not present
    fn delete(&self, id: u64) -> Result<bool, StorageError>;

    /// Number of stored records
    fn count(&self) -> usize;

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}

/// In-memory history for testing and minimal deployments
///
/// Thread-safe via `RwLock`. Not durable — records are lost on restart.
pub struct InMemoryLog {
    records: std::sync::RwLock<Vec<TuningRecord>>,
    next_id: std::sync::atomic::AtomicU64,
}

impl InMemoryLog {
    pub fn new() -> Self {
        Self {
            records: std::sync::RwLock::new(Vec::new()),
            next_id: std::sync::atomic::AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TuningLog for InMemoryLog {
    fn insert(&self, record: &TuningRecord) -> Result<u64, StorageError> {
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let mut stored = record.clone();
        stored.id = id;
        self.records
            .write()
            .map_err(|e| StorageError::Other(e.to_string()))?
            .push(stored);
        Ok(id)
    }

    fn get(&self, id: u64) -> Result<Option<TuningRecord>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|e| StorageError::Other(e.to_string()))?;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<TuningRecord>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|e| StorageError::Other(e.to_string()))?;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }

    fn delete(&self, id: u64) -> Result<bool, StorageError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StorageError::Other(e.to_string()))?;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }

    fn count(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    fn backend_name(&self) -> &'static str {
        "in-memory"
    }
}
