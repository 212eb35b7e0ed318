//! GuardMon - Device Monitoring & Enforcement Agent
//!
//! The platform bridge feeds accessibility and notification events as
//! JSON lines on stdin; enforcement actions go through the configured
//! platform backend. The host application shares the settings store for
//! the blocklist, the lock trigger, and the capture buffers.

use guardmon::feed::spawn_feed;
use guardmon::monitor::{spawn_lock_watcher, LockWatcherConfig, MonitorEvent, MonitorService};
use guardmon::platform::{LoggingPlatform, PlatformActions};
use guardmon::settings::{SettingsStore, SqliteStore};
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Single instance via lock file
    let lock_path = data_dir().join("guardmon.lock");
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    if lock_path.exists() {
        eprintln!(
            "Warning: stale lock file at {} (another instance, or an unclean exit)",
            lock_path.display()
        );
    }
    let mut file = std::fs::File::create(&lock_path)?;
    write!(file, "{}", std::process::id())?;
    let _lock_guard = LockFileGuard(lock_path);

    run_agent()
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("guardmon")
}

// RAII guard to delete lock file on exit
struct LockFileGuard(PathBuf);

impl Drop for LockFileGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn run_agent() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("guardmon=info")),
        )
        .init();

    println!("GuardMon - monitoring agent starting");

    let store: Arc<dyn SettingsStore> = Arc::new(SqliteStore::open_default()?);

    // The logging backend stands in for a device binding; the launcher
    // id comes from the environment when the bridge knows it.
    let launcher = std::env::var("GUARDMON_LAUNCHER").ok();
    let platform: Arc<dyn PlatformActions> = Arc::new(LoggingPlatform::new(launcher));

    let (tx, rx) = mpsc::channel::<MonitorEvent>();
    let shutdown = Arc::new(AtomicBool::new(false));

    // Watch the remote lock trigger
    let watcher_handle = spawn_lock_watcher(
        Arc::clone(&store),
        tx.clone(),
        Arc::clone(&shutdown),
        LockWatcherConfig::default(),
    );

    // Bridge events from stdin
    let feed_handle = spawn_feed(BufReader::new(std::io::stdin()), tx.clone());

    // Ctrl+C stops the dispatch loop
    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        shutdown_ctrlc.store(true, Ordering::SeqCst);
        let _ = tx.send(MonitorEvent::Shutdown);
    })?;

    // Recovers the locked state before consuming any event, then runs
    // until shutdown and tears the overlay down.
    let mut service = MonitorService::new(Arc::clone(&store), platform);
    service.run(rx);

    shutdown.store(true, Ordering::SeqCst);
    watcher_handle.join().expect("Lock watcher panicked");
    drop(feed_handle); // stdin reader exits with the process

    println!("GuardMon stopped");
    Ok(())
}
