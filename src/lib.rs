//! GuardMon - device monitoring and enforcement agent.
//!
//! Consumes a stream of UI-accessibility and notification events, blocks
//! listed foreground applications, drives a remotely-triggered lock
//! overlay, and captures browsing URLs and notification payloads into
//! append-only buffers for the host application to collect.

pub mod feed;
pub mod monitor;
pub mod platform;
pub mod settings;
pub mod store;
