//! Platform touch points.
//!
//! The agent reaches the device through exactly four actions: resolving
//! the default launcher, returning to the home screen, and showing or
//! hiding the blocking overlay. Everything device-specific lives behind
//! [`PlatformActions`]; the monitoring core never talks to the platform
//! directly.

pub mod logging;

pub use logging::LoggingPlatform;

/// Errors from platform actions.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The overlay window could not be created, typically because the
    /// overlay permission is not granted.
    #[error("overlay unavailable: {0}")]
    OverlayUnavailable(String),

    #[error("platform action failed: {0}")]
    ActionFailed(String),
}

/// Device actions the enforcement core depends on.
///
/// Implementations must be cheap and non-blocking: these are called
/// synchronously from the event-dispatch thread.
pub trait PlatformActions: Send + Sync {
    /// Resolves the package identifier of the default home/launcher
    /// application. `None` when resolution fails; the caller treats the
    /// launcher exemption as absent in that case.
    fn resolve_launcher(&self) -> Option<String>;

    /// Sends the device to the home screen.
    fn go_home(&self) -> Result<(), PlatformError>;

    /// Shows the full-screen input-intercepting lock overlay.
    fn show_overlay(&self) -> Result<(), PlatformError>;

    /// Removes the lock overlay if present.
    fn hide_overlay(&self) -> Result<(), PlatformError>;
}
