//! Lock-trigger flag watcher.
//!
//! The settings store has no cross-process change notification, so the
//! remote lock flag is polled on its own thread and edge-detected into
//! `LockFlag` events. The service applies transitions idempotently, so a
//! spurious duplicate is harmless.

use crate::monitor::events::MonitorEvent;
use crate::settings::{read_lock_trigger, SettingsStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Configuration for the lock watcher.
#[derive(Debug, Clone)]
pub struct LockWatcherConfig {
    /// How often to poll the lock trigger (default: 250ms).
    pub poll_interval: Duration,
}

impl Default for LockWatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(250),
        }
    }
}

/// Spawns the lock-watcher thread.
///
/// Sends `MonitorEvent::LockFlag` whenever the stored flag differs from
/// the last observed value. A read failure skips the cycle: a transient
/// store error must not unlock the device.
///
/// # Arguments
/// * `store` - Settings store holding the flag
/// * `tx` - Service channel for flag-change events
/// * `shutdown` - Atomic flag to signal thread termination
pub fn spawn_lock_watcher(
    store: Arc<dyn SettingsStore>,
    tx: Sender<MonitorEvent>,
    shutdown: Arc<AtomicBool>,
    config: LockWatcherConfig,
) -> JoinHandle<()> {
    // Snapshot before the thread starts: the service already applied
    // this value during recovery, and a change racing the spawn must
    // still be observed as an edge.
    let mut last_seen = read_lock_trigger(store.as_ref()).unwrap_or(false);

    thread::spawn(move || {
        tracing::info!(
            interval_ms = config.poll_interval.as_millis(),
            "Lock watcher started"
        );

        while !shutdown.load(Ordering::SeqCst) {
            match read_lock_trigger(store.as_ref()) {
                Ok(flag) if flag != last_seen => {
                    last_seen = flag;
                    tracing::info!(locked = flag, "Lock trigger changed");
                    if tx.send(MonitorEvent::LockFlag(flag)).is_err() {
                        // Service is gone; nothing left to watch for.
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Lock trigger unreadable, skipping cycle");
                }
            }

            thread::sleep(config.poll_interval);
        }

        tracing::info!("Lock watcher shutting down");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{keys, MemoryStore};
    use std::sync::mpsc;

    #[test]
    fn test_watcher_config_default() {
        let config = LockWatcherConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_emits_on_edges_only() {
        let store = Arc::new(MemoryStore::new());
        let (tx, rx) = mpsc::channel();
        let shutdown = Arc::new(AtomicBool::new(false));

        let handle = spawn_lock_watcher(
            Arc::clone(&store) as Arc<dyn SettingsStore>,
            tx,
            Arc::clone(&shutdown),
            LockWatcherConfig {
                poll_interval: Duration::from_millis(5),
            },
        );

        store.set(keys::LOCK_TRIGGER, "true").unwrap();
        match rx.recv_timeout(Duration::from_secs(1)).unwrap() {
            MonitorEvent::LockFlag(true) => {}
            other => panic!("unexpected event: {other:?}"),
        }

        store.set(keys::LOCK_TRIGGER, "false").unwrap();
        match rx.recv_timeout(Duration::from_secs(1)).unwrap() {
            MonitorEvent::LockFlag(false) => {}
            other => panic!("unexpected event: {other:?}"),
        }

        // A steady flag produces no further events.
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

        shutdown.store(true, Ordering::SeqCst);
        handle.join().unwrap();
    }

    #[test]
    fn test_read_failure_does_not_unlock() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::LOCK_TRIGGER, "true").unwrap();

        let (tx, rx) = mpsc::channel();
        let shutdown = Arc::new(AtomicBool::new(false));

        let handle = spawn_lock_watcher(
            Arc::clone(&store) as Arc<dyn SettingsStore>,
            tx,
            Arc::clone(&shutdown),
            LockWatcherConfig {
                poll_interval: Duration::from_millis(5),
            },
        );

        // Flag was already true at watcher start, so failures afterwards
        // must not synthesize a LockFlag(false).
        store.set_fail_reads(true);
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

        shutdown.store(true, Ordering::SeqCst);
        handle.join().unwrap();
    }
}
