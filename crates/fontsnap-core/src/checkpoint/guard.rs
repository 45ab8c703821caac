//! Scoped checkpoint: owns the run state and flushes it exactly once.
//!
//! Callers flush through `finish()` on every path they control so a failed
//! write reaches the caller. `Drop` only covers paths they don't (unwind).

use super::{Checkpoint, CheckpointSummary};
use crate::state::RunState;
use anyhow::Result;

pub struct CheckpointGuard<'w, C: Checkpoint> {
    writer: &'w C,
    state: RunState,
    flushed: bool,
}

impl<'w, C: Checkpoint> CheckpointGuard<'w, C> {
    pub fn new(writer: &'w C, state: RunState) -> Self {
        Self {
            writer,
            state,
            flushed: false,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }

    /// Flush now and disarm the drop-time flush.
    pub fn finish(mut self) -> Result<CheckpointSummary> {
        self.flushed = true;
        self.writer.flush(&self.state)
    }
}

impl<C: Checkpoint> Drop for CheckpointGuard<'_, C> {
    fn drop(&mut self) {
        if self.flushed {
            return;
        }
        self.flushed = true;
        if let Err(e) = self.writer.flush(&self.state) {
            tracing::error!("checkpoint flush failed: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::CheckpointWriter;
    use crate::strategy::StrategyTable;
    use std::cell::Cell;
    use std::fs;

    #[derive(Default)]
    struct CountingCheckpoint {
        flushes: Cell<usize>,
        records_seen: Cell<usize>,
    }

    impl Checkpoint for CountingCheckpoint {
        fn flush(&self, state: &RunState) -> Result<CheckpointSummary> {
            self.flushes.set(self.flushes.get() + 1);
            self.records_seen.set(state.records().len());
            Ok(CheckpointSummary {
                counts: state.counts().to_vec(),
                resolved: state.records().len(),
                unresolved: state.unresolved().len(),
            })
        }
    }

    fn state() -> RunState {
        RunState::new(&StrategyTable::standard())
    }

    #[test]
    fn drop_without_finish_flushes() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CheckpointWriter::new(dir.path().join("wtfs.txt"), dir.path().join("names.txt"));
        {
            let mut guard = CheckpointGuard::new(&writer, state());
            guard
                .state_mut()
                .record_success("remove-ttf", "ttf-hack", "hack");
        }
        assert_eq!(
            fs::read_to_string(writer.mapping_path()).unwrap(),
            "ttf-hack,hack\n"
        );
    }

    #[test]
    fn finish_flushes_exactly_once() {
        let counter = CountingCheckpoint::default();
        let mut guard = CheckpointGuard::new(&counter, state());
        guard.state_mut().record_success("plain", "ttf-x", "ttf-x");
        let summary = guard.finish().unwrap();
        assert_eq!(summary.resolved, 1);
        assert_eq!(counter.flushes.get(), 1);
    }

    #[test]
    fn drop_flushes_exactly_once() {
        let counter = CountingCheckpoint::default();
        {
            let mut guard = CheckpointGuard::new(&counter, state());
            guard.state_mut().record_unresolved("ttf-y");
            guard.state_mut().record_success("plain", "ttf-x", "ttf-x");
        }
        assert_eq!(counter.flushes.get(), 1);
        assert_eq!(counter.records_seen.get(), 1);
    }

    #[test]
    fn unwind_still_flushes() {
        let counter = CountingCheckpoint::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut guard = CheckpointGuard::new(&counter, state());
            guard.state_mut().record_success("plain", "ttf-x", "ttf-x");
            panic!("resolver blew up");
        }));
        assert!(result.is_err());
        assert_eq!(counter.flushes.get(), 1);
    }
}
