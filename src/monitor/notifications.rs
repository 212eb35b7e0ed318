//! Notification capture.
//!
//! Normalizes raw notification payloads into [`CapturedNotification`]
//! records, dropping platform noise. The same path serves live postings
//! and the attach-time snapshot of already-active notifications; a
//! notification delivered by both is captured twice, which the consumer
//! tolerates.

use crate::monitor::events::RawNotification;
use crate::store::CapturedNotification;

/// The platform's own notification sources, never worth capturing.
const SYSTEM_PACKAGES: &[&str] = &["android", "com.android.systemui"];

/// Extracts and filters notification payloads.
#[derive(Debug, Default)]
pub struct NotificationCapturer;

impl NotificationCapturer {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes one payload, or drops it.
    ///
    /// Dropped when the source is a system namespace or when title and
    /// body are both empty after extraction.
    pub fn capture(&self, raw: &RawNotification) -> Option<CapturedNotification> {
        if SYSTEM_PACKAGES.contains(&raw.package_name.as_str()) {
            return None;
        }

        let title = raw.title.clone().unwrap_or_default();
        let text = raw.text.clone().unwrap_or_default();
        if title.is_empty() && text.is_empty() {
            return None;
        }

        tracing::debug!(app = %raw.package_name, title = %title, "Captured notification");

        Some(CapturedNotification {
            package_name: raw.package_name.clone(),
            title,
            text,
            timestamp: raw.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(package: &str, title: Option<&str>, text: Option<&str>) -> RawNotification {
        RawNotification {
            package_name: package.to_string(),
            title: title.map(str::to_string),
            text: text.map(str::to_string),
            timestamp: 1_000,
        }
    }

    #[test]
    fn test_captures_ordinary_notification() {
        let capturer = NotificationCapturer::new();
        let record = capturer
            .capture(&raw("com.whatsapp", Some("Alice"), Some("hey")))
            .unwrap();

        assert_eq!(record.package_name, "com.whatsapp");
        assert_eq!(record.title, "Alice");
        assert_eq!(record.text, "hey");
        assert_eq!(record.timestamp, 1_000);
    }

    #[test]
    fn test_drops_system_sources() {
        let capturer = NotificationCapturer::new();
        assert!(capturer
            .capture(&raw("android", Some("t"), Some("b")))
            .is_none());
        assert!(capturer
            .capture(&raw("com.android.systemui", Some("t"), Some("b")))
            .is_none());
    }

    #[test]
    fn test_drops_empty_payload() {
        let capturer = NotificationCapturer::new();
        assert!(capturer.capture(&raw("com.whatsapp", None, None)).is_none());
        assert!(capturer
            .capture(&raw("com.whatsapp", Some(""), Some("")))
            .is_none());
    }

    #[test]
    fn test_keeps_title_only_and_body_only() {
        let capturer = NotificationCapturer::new();

        let title_only = capturer
            .capture(&raw("com.whatsapp", Some("Alice"), None))
            .unwrap();
        assert_eq!(title_only.text, "");

        let body_only = capturer
            .capture(&raw("com.whatsapp", None, Some("hey")))
            .unwrap();
        assert_eq!(body_only.title, "");
    }
}
