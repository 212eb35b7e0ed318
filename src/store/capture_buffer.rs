//! Append-only capture buffer persisted through the settings store.
//!
//! The persisted form is a JSON array of strings, each string the JSON
//! encoding of one record. The host application drains the buffer by
//! reading the blob and clearing the key; this side only ever appends.
//!
//! Decode failures never discard history on purpose: an unreadable or
//! undecodable blob is treated as an empty buffer, and a single bad
//! element is skipped rather than taking its neighbors down with it.

use crate::settings::{SettingsStore, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Append-only record buffer stored as one encoded blob per key.
///
/// Every append re-reads, re-encodes and rewrites the whole blob in one
/// `set` call, so concurrent readers never observe a partial write.
/// Appends to the same key must come from a single writer; the service
/// thread is the only appender in this agent.
pub struct CaptureBuffer {
    store: Arc<dyn SettingsStore>,
    key: &'static str,
}

impl CaptureBuffer {
    pub fn new(store: Arc<dyn SettingsStore>, key: &'static str) -> Self {
        Self { store, key }
    }

    /// Appends one record to the end of the buffer.
    ///
    /// O(current size): the storage layer has no incremental append, so
    /// the whole blob is rewritten. Capture volume is bounded by human
    /// interaction rate, which keeps this acceptable.
    pub fn append<T: Serialize>(&self, record: &T) -> Result<(), StoreError> {
        let mut entries = self.load_raw();

        let encoded = serde_json::to_string(record)
            .map_err(|e| StoreError::Unavailable(format!("record encode failed: {e}")))?;
        entries.push(encoded);

        let blob = serde_json::to_string(&entries)
            .map_err(|e| StoreError::Unavailable(format!("buffer encode failed: {e}")))?;
        self.store.set(self.key, &blob)?;

        tracing::debug!(key = self.key, len = entries.len(), "Appended capture record");
        Ok(())
    }

    /// Loads every decodable record, oldest first.
    ///
    /// Never fails: an unreadable store or corrupt blob yields an empty
    /// vector, a corrupt element is skipped with a warning.
    pub fn load_all<T: DeserializeOwned>(&self) -> Vec<T> {
        self.load_raw()
            .iter()
            .filter_map(|entry| match serde_json::from_str(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(key = self.key, error = %e, "Skipping undecodable buffer entry");
                    None
                }
            })
            .collect()
    }

    /// Reads the raw entry list, falling back to empty on any failure.
    fn load_raw(&self) -> Vec<String> {
        let blob = match self.store.get(self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "Buffer read failed, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "Corrupt buffer blob, treating as empty");
                Vec::new()
            }
        }
    }
}
