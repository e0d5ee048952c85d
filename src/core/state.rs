//! Process state for watch mode.
//!
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C received)
//! - `WATCHING`: Is a watch loop registered to be woken on shutdown?

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Wakes the watch loop so it can exit between regenerations
static SHUTDOWN_TX: OnceLock<crossbeam::channel::Sender<()>> = OnceLock::new();

/// Setup the global Ctrl+C handler. Call once at program start
///
/// - Before `register_watcher()`: exit immediately, nothing to wind down
/// - After `register_watcher()`: set the flag and wake the watch loop
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if let Some(tx) = SHUTDOWN_TX.get() {
            crate::log!("watch"; "shutting down...");
            let _ = tx.send(());
        } else {
            std::process::exit(0);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the watch loop's shutdown channel.
///
/// Returns false if one is already registered.
pub fn register_watcher(shutdown_tx: crossbeam::channel::Sender<()>) -> bool {
    SHUTDOWN_TX.set(shutdown_tx).is_ok()
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Check if a watch loop is registered
pub fn is_watching() -> bool {
    SHUTDOWN_TX.get().is_some()
}
