//! Ctrl-C → abort token. The engine polls the token between requests, while
//! pacing and from curl's progress callback, then unwinds and checkpoints.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Spawn a task that sets `abort` on the first Ctrl-C.
pub fn watch(abort: Arc<AtomicBool>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("interrupt received, stopping after checkpoint");
                abort.store(true, Ordering::Relaxed);
            }
            Err(e) => tracing::warn!("could not listen for Ctrl-C: {}", e),
        }
    });
}
