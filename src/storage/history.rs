//! Sled-backed tuning history
//!
//! Stores `TuningRecord`s keyed by opaque u64 id as big-endian bytes so
//! plain key iteration sorts chronologically. Values are JSON-serialized
//! records.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::types::TuningRecord;

use super::{StorageError, TuningLog};

/// Durable history of issued prescriptions
#[derive(Clone)]
pub struct TuningHistory {
    db: Arc<sled::Db>,
}

/// Summary statistics over the stored history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStats {
    pub record_count: usize,
    pub size_bytes: u64,
    pub oldest_id: Option<u64>,
    pub newest_id: Option<u64>,
}

impl TuningHistory {
    /// Open or create the history store at the specified path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(&path)?;
        info!(path = %path.as_ref().display(), records = db.len(), "tuning history opened");
        Ok(Self { db: Arc::new(db) })
    }

    /// Open at the configured default path
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(&crate::config::get().session.history_path)
    }

    /// Next free id at or after the current timestamp
    ///
    /// Ids are timestamp millis, bumped past collisions so two records
    /// saved in the same millisecond keep distinct keys. Ids therefore
    /// strictly increase in insertion order.
    fn allocate_id(&self) -> Result<u64, StorageError> {
        let mut id = Utc::now().timestamp_millis().max(0) as u64;
        if let Some(last) = self.newest_id()? {
            if id <= last {
                id = last + 1;
            }
        }
        Ok(id)
    }

    fn newest_id(&self) -> Result<Option<u64>, StorageError> {
        Ok(self.db.last()?.map(|(key, _)| decode_id(&key)))
    }

    /// Get database size in bytes
    pub fn size_bytes(&self) -> u64 {
        self.db.size_on_disk().unwrap_or(0)
    }

    /// Get storage statistics
    pub fn stats(&self) -> Result<HistoryStats, StorageError> {
        let oldest_id = self.db.first()?.map(|(key, _)| decode_id(&key));
        let newest_id = self.newest_id()?;
        Ok(HistoryStats {
            record_count: self.db.len(),
            size_bytes: self.size_bytes(),
            oldest_id,
            newest_id,
        })
    }

    /// Clear all records
    pub fn clear(&self) -> Result<(), StorageError> {
        self.db.clear()?;
        self.db.flush()?;
        Ok(())
    }
}

impl TuningLog for TuningHistory {
    fn insert(&self, record: &TuningRecord) -> Result<u64, StorageError> {
        let id = self.allocate_id()?;
        let mut stored = record.clone();
        stored.id = id;
        let value = serde_json::to_vec(&stored)?;
        self.db.insert(id.to_be_bytes(), value)?;
        Ok(id)
    }

    fn get(&self, id: u64) -> Result<Option<TuningRecord>, StorageError> {
        match self.db.get(id.to_be_bytes())? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }

    fn recent(&self, limit: usize) -> Result<Vec<TuningRecord>, StorageError> {
        let mut records = Vec::with_capacity(limit);
        for item in self.db.iter().rev() {
            if records.len() >= limit {
                break;
            }
            let (_key, value) = item?;
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }

    fn delete(&self, id: u64) -> Result<bool, StorageError> {
        let removed = self.db.remove(id.to_be_bytes())?.is_some();
        if removed {
            self.db.flush()?;
        }
        Ok(removed)
    }

    fn count(&self) -> usize {
        self.db.len()
    }

    fn backend_name(&self) -> &'static str {
        "sled"
    }
}

fn decode_id(key: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&key[..8]);
    u64::from_be_bytes(bytes)
}
