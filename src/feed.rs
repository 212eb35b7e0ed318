//! JSON-lines event bridge.
//!
//! The platform side of a deployment delivers accessibility and
//! notification events as one JSON document per line on the agent's
//! stdin. This module parses that stream and forwards it into the
//! service channel. A malformed line is logged and skipped; the bridge
//! only stops when its input closes.

use crate::monitor::events::{MonitorEvent, RawNotification, UiNode};
use serde::Deserialize;
use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

/// Wire shape of one bridge line.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FeedEvent {
    /// `{"type":"foreground","app":"com.x","tree":{...}}`
    Foreground {
        app: String,
        #[serde(default)]
        tree: Option<UiNode>,
    },

    /// `{"type":"content","app":"com.x","tree":{...}}`
    Content {
        app: String,
        #[serde(default)]
        tree: Option<UiNode>,
    },

    /// `{"type":"notification","packageName":...,"title":...,"text":...,"timestamp":...}`
    Notification(RawNotification),

    /// `{"type":"notificationSnapshot","notifications":[...]}`
    NotificationSnapshot { notifications: Vec<RawNotification> },
}

impl From<FeedEvent> for MonitorEvent {
    fn from(event: FeedEvent) -> Self {
        match event {
            FeedEvent::Foreground { app, tree } => MonitorEvent::ForegroundChanged { app, tree },
            FeedEvent::Content { app, tree } => MonitorEvent::ContentChanged { app, tree },
            FeedEvent::Notification(raw) => MonitorEvent::NotificationPosted(raw),
            FeedEvent::NotificationSnapshot { notifications } => {
                MonitorEvent::NotificationSnapshot(notifications)
            }
        }
    }
}

/// Parses one bridge line.
pub fn parse_line(line: &str) -> Result<MonitorEvent, serde_json::Error> {
    serde_json::from_str::<FeedEvent>(line).map(MonitorEvent::from)
}

/// Spawns the reader thread for a bridge stream.
///
/// Stops when the stream closes or the service side hangs up. Blank
/// lines are ignored, malformed lines logged and skipped.
pub fn spawn_feed<R>(reader: R, tx: Sender<MonitorEvent>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        tracing::info!("Event feed started");

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "Feed read error, stopping");
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match parse_line(&line) {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed feed line");
                }
            }
        }

        tracing::info!("Event feed closed");
    })
}
