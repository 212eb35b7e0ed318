//! Capture storage.
//!
//! Captured URLs and notifications are queued for the host application
//! in append-only buffers persisted through the settings store.

pub mod capture_buffer;
pub mod types;

pub use capture_buffer::*;
pub use types::*;
