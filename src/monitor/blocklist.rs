//! Blocked-package evaluation.
//!
//! The blocklist lives in the settings store and is edited by the host
//! application at any time, so it is re-read on every evaluation; no
//! cached copy outlives a single call.

use crate::settings::{keys, SettingsStore};
use std::collections::HashSet;
use std::sync::Arc;

/// Decides whether a foreground application must be blocked.
pub struct BlockListEvaluator {
    store: Arc<dyn SettingsStore>,

    /// Default launcher package, resolved once at startup. `None` when
    /// resolution failed; the exemption is simply absent then.
    launcher: Option<String>,
}

impl BlockListEvaluator {
    pub fn new(store: Arc<dyn SettingsStore>, launcher: Option<String>) -> Self {
        if launcher.is_none() {
            tracing::warn!("No launcher package resolved; home exemption disabled");
        }
        Self { store, launcher }
    }

    /// Returns true iff `app` is currently blocked.
    ///
    /// The launcher is never blocked, whatever the list says. An
    /// unreadable store yields an empty list (fail open).
    pub fn should_block(&self, app: &str) -> bool {
        if self.launcher.as_deref() == Some(app) {
            return false;
        }

        let blocked = self.load_blocked_set();
        let is_blocked = blocked.contains(app);
        if is_blocked {
            tracing::info!(app = %app, "Blocking foreground app");
        }
        is_blocked
    }

    fn load_blocked_set(&self) -> HashSet<String> {
        let raw = match self.store.get(keys::BLOCKED_APPS) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Blocklist unreadable, treating as empty");
                return HashSet::new();
            }
        };

        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;

    const LAUNCHER: &str = "com.android.launcher3";

    fn evaluator(store: &Arc<MemoryStore>) -> BlockListEvaluator {
        BlockListEvaluator::new(
            Arc::clone(store) as Arc<dyn SettingsStore>,
            Some(LAUNCHER.to_string()),
        )
    }

    #[test]
    fn test_blocks_listed_apps_only() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(keys::BLOCKED_APPS, "com.game.one,com.game.two")
            .unwrap();

        let eval = evaluator(&store);
        assert!(eval.should_block("com.game.one"));
        assert!(eval.should_block("com.game.two"));
        assert!(!eval.should_block("com.messaging.app"));
    }

    #[test]
    fn test_launcher_exempt_even_when_listed() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(keys::BLOCKED_APPS, &format!("com.game.one,{LAUNCHER}"))
            .unwrap();

        let eval = evaluator(&store);
        assert!(!eval.should_block(LAUNCHER));
        assert!(eval.should_block("com.game.one"));
    }

    #[test]
    fn test_no_launcher_resolved_means_no_exemption() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::BLOCKED_APPS, LAUNCHER).unwrap();

        let eval = BlockListEvaluator::new(Arc::clone(&store) as Arc<dyn SettingsStore>, None);
        assert!(eval.should_block(LAUNCHER));
    }

    #[test]
    fn test_reloads_list_on_every_call() {
        let store = Arc::new(MemoryStore::new());
        let eval = evaluator(&store);

        assert!(!eval.should_block("com.game.one"));

        store.set(keys::BLOCKED_APPS, "com.game.one").unwrap();
        assert!(eval.should_block("com.game.one"));

        store.set(keys::BLOCKED_APPS, "").unwrap();
        assert!(!eval.should_block("com.game.one"));
    }

    #[test]
    fn test_unreadable_store_fails_open() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::BLOCKED_APPS, "com.game.one").unwrap();

        let eval = evaluator(&store);
        store.set_fail_reads(true);
        assert!(!eval.should_block("com.game.one"));
    }

    #[test]
    fn test_tolerates_whitespace_and_empty_entries() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(keys::BLOCKED_APPS, " com.game.one , ,com.game.two,")
            .unwrap();

        let eval = evaluator(&store);
        assert!(eval.should_block("com.game.one"));
        assert!(eval.should_block("com.game.two"));
        assert!(!eval.should_block(""));
    }
}
