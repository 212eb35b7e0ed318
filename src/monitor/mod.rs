//! Core monitoring and enforcement logic.
//!
//! This module contains the three capture/enforcement managers, the
//! lock-trigger watcher, and the service that orchestrates them over a
//! single event channel.

pub mod blocklist;
pub mod events;
pub mod lock_watcher;
pub mod notifications;
pub mod service;
pub mod web_history;

pub use blocklist::*;
pub use events::*;
pub use lock_watcher::*;
pub use notifications::*;
pub use service::*;
pub use web_history::*;
