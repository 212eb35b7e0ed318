//! Enforcement and lock orchestration.
//!
//! `MonitorService` owns all mutable monitoring state and consumes every
//! event stream from a single channel on a single thread, so the lock
//! state never races the event handlers. A malformed event must never
//! stop the stream: extraction and persistence failures are logged and
//! swallowed at the per-event boundary, and the only externally visible
//! failure mode is one missed enforcement.

use crate::monitor::blocklist::BlockListEvaluator;
use crate::monitor::events::{MonitorEvent, RawNotification, UiNode};
use crate::monitor::notifications::NotificationCapturer;
use crate::monitor::web_history::WebHistoryTracker;
use crate::platform::PlatformActions;
use crate::settings::{keys, read_lock_trigger, SettingsStore};
use crate::store::CaptureBuffer;
use chrono::Utc;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

/// Whether the blocking overlay is (logically) in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked,
}

/// Top-level monitoring service: blocklist enforcement, URL and
/// notification capture, and the remotely-triggered lock overlay.
pub struct MonitorService {
    store: Arc<dyn SettingsStore>,
    platform: Arc<dyn PlatformActions>,

    blocklist: BlockListEvaluator,
    web_history: WebHistoryTracker,
    notifications: NotificationCapturer,

    web_buffer: CaptureBuffer,
    notification_buffer: CaptureBuffer,

    lock_state: LockState,
    overlay_shown: bool,
}

impl MonitorService {
    /// Builds the service and recovers the lock state.
    ///
    /// If the lock trigger is already set (the process restarted while
    /// locked), the overlay goes up here, before any event is consumed.
    pub fn new(store: Arc<dyn SettingsStore>, platform: Arc<dyn PlatformActions>) -> Self {
        let launcher = platform.resolve_launcher().or_else(|| {
            // Platform resolution failed; the host may have stored an
            // explicit override.
            store.get(keys::LAUNCHER_PACKAGE).ok().flatten()
        });

        let mut service = Self {
            blocklist: BlockListEvaluator::new(Arc::clone(&store), launcher),
            web_history: WebHistoryTracker::new(),
            notifications: NotificationCapturer::new(),
            web_buffer: CaptureBuffer::new(Arc::clone(&store), keys::WEB_BUFFER),
            notification_buffer: CaptureBuffer::new(Arc::clone(&store), keys::NOTIFICATION_BUFFER),
            lock_state: LockState::Unlocked,
            overlay_shown: false,
            store,
            platform,
        };

        match read_lock_trigger(service.store.as_ref()) {
            Ok(true) => {
                tracing::info!("Lock trigger set at startup, recovering locked state");
                service.lock();
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Lock trigger unreadable at startup, starting unlocked");
            }
        }

        service
    }

    /// Consumes events until `Shutdown` or channel close, then tears
    /// down the overlay.
    pub fn run(&mut self, rx: Receiver<MonitorEvent>) {
        tracing::info!("Monitor service running");

        while let Ok(event) = rx.recv() {
            if matches!(event, MonitorEvent::Shutdown) {
                break;
            }
            self.handle_event(event);
        }

        self.teardown();
    }

    /// Dispatches one event. Public so embedders and tests can drive the
    /// service without a channel.
    pub fn handle_event(&mut self, event: MonitorEvent) {
        match event {
            MonitorEvent::LockFlag(true) => self.lock(),
            MonitorEvent::LockFlag(false) => self.unlock(),

            // The overlay is definitionally blocking: while it is up,
            // accessibility events carry no enforcement work.
            MonitorEvent::ForegroundChanged { .. } | MonitorEvent::ContentChanged { .. }
                if self.lock_state == LockState::Locked => {}

            MonitorEvent::ForegroundChanged { app, tree } => {
                if self.blocklist.should_block(&app) {
                    if let Err(e) = self.platform.go_home() {
                        tracing::warn!(app = %app, error = %e, "Home action failed");
                    }
                    // Blocked app's own event carries nothing worth
                    // capturing.
                    return;
                }
                self.scan_tree(&app, tree.as_ref());
            }

            MonitorEvent::ContentChanged { app, tree } => {
                self.scan_tree(&app, tree.as_ref());
            }

            MonitorEvent::NotificationPosted(raw) => self.capture_notification(&raw),

            MonitorEvent::NotificationSnapshot(active) => {
                tracing::info!(count = active.len(), "Replaying active notifications");
                for raw in &active {
                    self.capture_notification(raw);
                }
            }

            MonitorEvent::Shutdown => {}
        }
    }

    /// Current lock state.
    pub fn lock_state(&self) -> LockState {
        self.lock_state
    }

    /// Hides the overlay if the service dies while locked. A leaked
    /// overlay is a system-level window the user cannot dismiss.
    pub fn teardown(&mut self) {
        if self.overlay_shown {
            if let Err(e) = self.platform.hide_overlay() {
                tracing::warn!(error = %e, "Failed to remove overlay on teardown");
            }
            self.overlay_shown = false;
        }
        tracing::info!("Monitor service stopped");
    }

    fn lock(&mut self) {
        if self.lock_state == LockState::Locked {
            return;
        }
        self.lock_state = LockState::Locked;

        match self.platform.show_overlay() {
            Ok(()) => {
                self.overlay_shown = true;
                tracing::info!("Lock overlay shown");
            }
            Err(e) => {
                // Best effort without the overlay: at least leave
                // whatever app is in the foreground.
                tracing::warn!(error = %e, "Overlay unavailable, falling back to home action");
                if let Err(e) = self.platform.go_home() {
                    tracing::warn!(error = %e, "Home fallback failed");
                }
            }
        }
    }

    fn unlock(&mut self) {
        if self.lock_state == LockState::Unlocked {
            return;
        }
        self.lock_state = LockState::Unlocked;

        if self.overlay_shown {
            match self.platform.hide_overlay() {
                Ok(()) => tracing::info!("Lock overlay removed"),
                Err(e) => tracing::warn!(error = %e, "Failed to remove overlay"),
            }
            self.overlay_shown = false;
        }
    }

    fn scan_tree(&mut self, app: &str, tree: Option<&UiNode>) {
        let Some(root) = tree else {
            return;
        };

        let now_ms = Utc::now().timestamp_millis();
        if let Some(record) = self.web_history.observe(app, root, now_ms) {
            if let Err(e) = self.web_buffer.append(&record) {
                tracing::warn!(error = %e, "Failed to persist captured URL");
            }
        }
    }

    fn capture_notification(&mut self, raw: &RawNotification) {
        if let Some(record) = self.notifications.capture(raw) {
            if let Err(e) = self.notification_buffer.append(&record) {
                tracing::warn!(error = %e, "Failed to persist captured notification");
            }
        }
    }
}
