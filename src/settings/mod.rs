//! Cross-process settings store.
//!
//! The store is the only channel between this agent and the host
//! application: the host writes the blocklist and the lock trigger, the
//! agent writes the capture buffers. Everything goes through the
//! [`SettingsStore`] trait so the whole agent can run against an
//! in-memory store in tests.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Well-known keys shared with the host application.
///
/// Per-key reads and writes are atomic; nothing is transactional across
/// keys. Buffer keys hold the blob format described in
/// [`crate::store::capture_buffer`].
pub mod keys {
    /// Comma-separated foreign-app identifiers to block.
    pub const BLOCKED_APPS: &str = "blocked_apps";

    /// Boolean-as-string remote lock trigger ("true"/"1" locks).
    pub const LOCK_TRIGGER: &str = "lock_trigger";

    /// Captured browsing URLs, pending pickup by the host.
    pub const WEB_BUFFER: &str = "web_capture_buffer";

    /// Captured notifications, pending pickup by the host.
    pub const NOTIFICATION_BUFFER: &str = "notification_capture_buffer";

    /// Optional launcher-package override, consulted when the platform
    /// cannot resolve the default home application.
    pub const LAUNCHER_PACKAGE: &str = "launcher_package";
}

/// Errors from the settings store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("settings database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed, string-valued store shared with the host application.
///
/// Implementations must make individual `get`/`set` calls atomic with
/// respect to concurrent readers in other processes. Callers that layer
/// read-modify-write on top (the capture buffers) additionally assume a
/// single writer per key.
pub trait SettingsStore: Send + Sync {
    /// Reads a value. `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Reads the lock trigger, mapping "true"/"1" (case-insensitive) to
/// locked. Absent or unparseable values are unlocked.
pub fn read_lock_trigger(store: &dyn SettingsStore) -> Result<bool, StoreError> {
    let raw = store.get(keys::LOCK_TRIGGER)?;
    Ok(matches!(
        raw.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
        Some("true") | Some("1")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_trigger_parsing() {
        let store = MemoryStore::new();

        assert!(!read_lock_trigger(&store).unwrap());

        store.set(keys::LOCK_TRIGGER, "true").unwrap();
        assert!(read_lock_trigger(&store).unwrap());

        store.set(keys::LOCK_TRIGGER, "1").unwrap();
        assert!(read_lock_trigger(&store).unwrap());

        store.set(keys::LOCK_TRIGGER, "TRUE").unwrap();
        assert!(read_lock_trigger(&store).unwrap());

        store.set(keys::LOCK_TRIGGER, "false").unwrap();
        assert!(!read_lock_trigger(&store).unwrap());

        store.set(keys::LOCK_TRIGGER, "banana").unwrap();
        assert!(!read_lock_trigger(&store).unwrap());
    }
}
