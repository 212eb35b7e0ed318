//! Captured record types.
//!
//! These are the two record shapes the agent hands off to the host
//! application. Field names are part of the shared encoding and must not
//! change: the host decodes `url`/`packageName`/`timestamp` and
//! `packageName`/`title`/`text`/`timestamp` respectively.

use serde::{Deserialize, Serialize};

/// A browsing URL captured from a browser's UI tree.
///
/// Created on a debounce-passing detection, appended to the web capture
/// buffer, never mutated. Clearing the buffer is the host's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedUrl {
    /// The address-bar text that passed the URL heuristic.
    pub url: String,

    /// Identifier of the browser app the URL was captured from.
    #[serde(rename = "packageName")]
    pub package_name: String,

    /// Capture time in Unix milliseconds.
    pub timestamp: i64,
}

impl CapturedUrl {
    pub fn new(url: String, package_name: String, timestamp: i64) -> Self {
        Self {
            url,
            package_name,
            timestamp,
        }
    }
}

/// A system notification captured from the notification stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedNotification {
    /// Identifier of the app that posted the notification.
    #[serde(rename = "packageName")]
    pub package_name: String,

    /// Notification title, empty if the payload had none.
    pub title: String,

    /// Notification body, empty if the payload had none.
    pub text: String,

    /// Post time in Unix milliseconds, as reported by the platform.
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_url_encoding() {
        let record = CapturedUrl::new(
            "https://example.com".to_string(),
            "com.android.chrome".to_string(),
            1_700_000_000_000,
        );

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"packageName\":\"com.android.chrome\""));
        assert!(json.contains("\"url\":\"https://example.com\""));
        assert!(json.contains("\"timestamp\":1700000000000"));

        let back: CapturedUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_captured_notification_encoding() {
        let record = CapturedNotification {
            package_name: "com.whatsapp".to_string(),
            title: "Alice".to_string(),
            text: "See you at 6".to_string(),
            timestamp: 42,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"packageName\":\"com.whatsapp\""));
        assert!(json.contains("\"text\":\"See you at 6\""));

        let back: CapturedNotification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
