//! In-memory settings store.
//!
//! Used throughout the test suite and available to embedders that supply
//! their own persistence. The `fail_reads` switch exists so the fail-open
//! paths (empty blocklist, empty buffer) can be exercised.

use super::{SettingsStore, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// HashMap-backed settings store.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `get` fail, simulating an unreadable store.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected read failure".into()));
        }
        let values = self
            .values
            .lock()
            .map_err(|_| StoreError::Unavailable("values mutex poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| StoreError::Unavailable("values mutex poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_injected_failure() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();

        store.set_fail_reads(true);
        assert!(store.get("k").is_err());

        store.set_fail_reads(false);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
