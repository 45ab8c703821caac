//! Fixed delay between network round trips, interruptible by the abort token.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

const SLICE: Duration = Duration::from_millis(100);

/// Returned when the abort token is set while pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaceInterrupted;

#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No delay (tests, local mirrors).
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleep for the configured delay in short slices, returning early if
    /// `abort` becomes set. A delay too large to represent as a deadline
    /// waits until aborted.
    pub fn wait(&self, abort: &AtomicBool) -> Result<(), PaceInterrupted> {
        let deadline = Instant::now().checked_add(self.delay);
        loop {
            if abort.load(Ordering::Relaxed) {
                return Err(PaceInterrupted);
            }
            let slice = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(());
                    }
                    (deadline - now).min(SLICE)
                }
                None => SLICE,
            };
            std::thread::sleep(slice);
        }
    }
}
