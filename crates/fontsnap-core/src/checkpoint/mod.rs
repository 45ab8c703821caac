//! Checkpoint: durable flush of resolution progress.
//!
//! Writes the unresolved list (one package per line) and the mapping
//! (`package,base` per line), then reports per-strategy counters. Files are
//! overwritten wholesale on every flush via temp file + rename, so a crash
//! mid-flush leaves the previous checkpoint in place.

mod guard;

pub use guard::CheckpointGuard;

use crate::state::{RunState, StrategyCount};
use anyhow::{Context, Result};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What a flush reported to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointSummary {
    pub counts: Vec<StrategyCount>,
    pub resolved: usize,
    pub unresolved: usize,
}

impl fmt::Display for CheckpointSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.counts {
            writeln!(f, "  {:<40} {}", c.strategy, c.successes)?;
        }
        write!(
            f,
            "resolved: {}  unresolved: {}",
            self.resolved, self.unresolved
        )
    }
}

/// Durable destination for a run's progress.
pub trait Checkpoint {
    fn flush(&self, state: &RunState) -> Result<CheckpointSummary>;
}

#[derive(Debug, Clone)]
pub struct CheckpointWriter {
    unresolved_path: PathBuf,
    mapping_path: PathBuf,
}

impl CheckpointWriter {
    pub fn new(unresolved_path: impl Into<PathBuf>, mapping_path: impl Into<PathBuf>) -> Self {
        Self {
            unresolved_path: unresolved_path.into(),
            mapping_path: mapping_path.into(),
        }
    }

    pub fn unresolved_path(&self) -> &Path {
        &self.unresolved_path
    }

    pub fn mapping_path(&self) -> &Path {
        &self.mapping_path
    }

    /// Overwrite both checkpoint files from `state` and print the summary.
    pub fn flush(&self, state: &RunState) -> Result<CheckpointSummary> {
        let mut unresolved = String::new();
        for name in state.unresolved() {
            unresolved.push_str(name);
            unresolved.push('\n');
        }
        let mut mapping = String::new();
        for r in state.records() {
            mapping.push_str(&r.package);
            mapping.push(',');
            mapping.push_str(&r.base);
            mapping.push('\n');
        }
        write_atomic(&self.unresolved_path, unresolved.as_bytes())?;
        write_atomic(&self.mapping_path, mapping.as_bytes())?;

        let summary = CheckpointSummary {
            counts: state.counts().to_vec(),
            resolved: state.records().len(),
            unresolved: state.unresolved().len(),
        };
        tracing::info!(
            resolved = summary.resolved,
            unresolved = summary.unresolved,
            mapping = %self.mapping_path.display(),
            "checkpoint written"
        );
        println!("{}", summary);
        Ok(summary)
    }
}

impl Checkpoint for CheckpointWriter {
    fn flush(&self, state: &RunState) -> Result<CheckpointSummary> {
        CheckpointWriter::flush(self, state)
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).with_context(|| format!("create dir: {}", dir.display()))?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    tmp.write_all(data)
        .with_context(|| format!("write {}", path.display()))?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}
