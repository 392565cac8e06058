//! Process-wide shutdown state.
//!
//! The pipeline has no cancellation points beyond the builder's page loop:
//! Ctrl+C sets `SHUTDOWN`, the renderer stops scheduling work, and the
//! process exits non-zero. A second Ctrl+C exits immediately.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Exit status used when interrupted twice (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Setup the global Ctrl+C handler. Call once at program start
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if SHUTDOWN.swap(true, Ordering::SeqCst) {
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        crate::log!("error"; "interrupted, stopping after current step...");
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
///
/// Relaxed ordering: worst case a few more pages render before stopping.
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
