//! Event types delivered to the monitoring service.

use serde::{Deserialize, Serialize};

/// A node in a UI accessibility tree snapshot.
///
/// Owned by the snapshot that produced it; the monitoring core only
/// reads it during a scan and never retains it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiNode {
    /// Visible text of the node, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Accessibility label (content description), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_label: Option<String>,

    /// Child nodes in layout order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<UiNode>,
}

impl UiNode {
    /// Leaf node with visible text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Leaf node with an accessibility label only.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            accessibility_label: Some(label.into()),
            ..Self::default()
        }
    }
}

/// A notification payload as delivered by the platform's notification
/// listener, before filtering and normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNotification {
    /// Identifier of the posting app.
    pub package_name: String,

    /// Title extra, absent when the payload carries none.
    #[serde(default)]
    pub title: Option<String>,

    /// Body extra, absent when the payload carries none.
    #[serde(default)]
    pub text: Option<String>,

    /// Post time in Unix milliseconds.
    pub timestamp: i64,
}

/// One unit of work for the monitoring service.
///
/// Foreground and content changes come from the accessibility stream,
/// notifications from the notification listener, and lock-flag changes
/// from the settings watcher. All three streams funnel into one channel
/// so the service's state is only ever touched from its own thread.
#[derive(Debug)]
pub enum MonitorEvent {
    /// The visible top-level application changed.
    ForegroundChanged {
        app: String,
        tree: Option<UiNode>,
    },

    /// Visible UI content changed without an app switch.
    ContentChanged {
        app: String,
        tree: Option<UiNode>,
    },

    /// A notification was posted while the listener is attached.
    NotificationPosted(RawNotification),

    /// Notifications already active when the listener attached.
    NotificationSnapshot(Vec<RawNotification>),

    /// The remote lock trigger changed.
    LockFlag(bool),

    /// Stop the dispatch loop.
    Shutdown,
}
