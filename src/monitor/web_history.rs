//! Browsing-URL extraction from UI accessibility trees.
//!
//! Browsers render the current address somewhere in their UI tree, so a
//! foreground or content change on a known browser triggers a scan for
//! the most likely address-bar value. The classifier is a heuristic,
//! not a URL parser; false positives and negatives are expected and
//! tolerated downstream.

use crate::monitor::events::UiNode;
use crate::store::CapturedUrl;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Apps whose trees are worth scanning. Anything else returns
/// immediately without touching the tree.
static BROWSER_PACKAGES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "com.android.chrome",
        "com.google.android.apps.chrome",
        "com.microsoft.emmx",
        "org.mozilla.firefox",
        "com.sec.android.app.sbrowser",
        "com.opera.browser",
        "com.brave.browser",
        "com.mi.global.browser",
        "com.mi.global.browser.mini",
    ])
});

/// Repeated detections of the same URL inside this window are dropped.
const DEBOUNCE_WINDOW_MS: i64 = 5_000;

/// Stateful URL extractor with temporal debouncing.
///
/// One instance per monitoring session; the debounce state lives for the
/// process and resets only on restart.
#[derive(Debug, Default)]
pub struct WebHistoryTracker {
    last_url: String,
    last_capture_ms: i64,
}

impl WebHistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans a tree snapshot and returns a capture if a URL-like value
    /// is found and passes the debounce.
    ///
    /// Emits when the candidate differs from the last emitted URL, or
    /// when the last emission is older than the debounce window. There
    /// is deliberately no periodic re-log of an unchanged URL: only a
    /// new URL or a re-visit re-arms capture.
    pub fn observe(&mut self, app: &str, root: &UiNode, now_ms: i64) -> Option<CapturedUrl> {
        if !BROWSER_PACKAGES.contains(app) {
            return None;
        }

        let url = find_url(root)?;

        if url != self.last_url || now_ms - self.last_capture_ms > DEBOUNCE_WINDOW_MS {
            self.last_url = url.to_string();
            self.last_capture_ms = now_ms;
            tracing::info!(app = %app, url = %url, "Captured URL");
            return Some(CapturedUrl::new(url.to_string(), app.to_string(), now_ms));
        }

        tracing::trace!(url = %url, "URL suppressed by debounce");
        None
    }
}

/// Depth-first pre-order scan for the first URL-like value, testing
/// `text` before the accessibility label at each node.
fn find_url(node: &UiNode) -> Option<&str> {
    if let Some(text) = node.text.as_deref() {
        if is_url_like(text) {
            return Some(text);
        }
    }
    if let Some(label) = node.accessibility_label.as_deref() {
        if is_url_like(label) {
            return Some(label);
        }
    }

    node.children.iter().find_map(find_url)
}

/// URL-likeness heuristic.
///
/// Rule order matters: later rules assume earlier ones already excluded
/// obvious non-candidates.
fn is_url_like(text: &str) -> bool {
    if !text.contains('.') {
        return false;
    }
    if text.contains(' ') {
        return false;
    }

    let lowered = text.to_lowercase();
    if lowered.contains("search") || lowered.contains("type") || lowered.contains("google") {
        return false;
    }

    text.starts_with("http")
        || text.starts_with("www")
        || [".com", ".org", ".net", ".io", ".in"]
            .iter()
            .any(|suffix| text.ends_with(suffix))
}
