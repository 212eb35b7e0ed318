//! Tracing-backed platform implementation.
//!
//! Stands in for a real device binding: every action is logged and
//! succeeds, except that overlay support can be switched off to exercise
//! the home-action fallback. Device integrations implement
//! [`PlatformActions`] against the actual window and accessibility
//! services out of tree.

use super::{PlatformActions, PlatformError};

/// Platform stub that logs every requested action.
pub struct LoggingPlatform {
    launcher: Option<String>,
    overlay_supported: bool,
}

impl LoggingPlatform {
    pub fn new(launcher: Option<String>) -> Self {
        Self {
            launcher,
            overlay_supported: true,
        }
    }

    /// Disables overlay support, forcing the lock path onto its
    /// home-action fallback.
    pub fn without_overlay(mut self) -> Self {
        self.overlay_supported = false;
        self
    }
}

impl PlatformActions for LoggingPlatform {
    fn resolve_launcher(&self) -> Option<String> {
        self.launcher.clone()
    }

    fn go_home(&self) -> Result<(), PlatformError> {
        tracing::info!("Platform action: go home");
        Ok(())
    }

    fn show_overlay(&self) -> Result<(), PlatformError> {
        if !self.overlay_supported {
            return Err(PlatformError::OverlayUnavailable(
                "overlay disabled".to_string(),
            ));
        }
        tracing::info!("Platform action: show lock overlay");
        Ok(())
    }

    fn hide_overlay(&self) -> Result<(), PlatformError> {
        tracing::info!("Platform action: hide lock overlay");
        Ok(())
    }
}
