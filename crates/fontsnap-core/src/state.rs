//! In-memory accumulator for a single run: per-strategy success counters,
//! resolved package → base name records, and unresolved package names.
//!
//! Initialized empty at run start and flushed by the checkpoint writer.
//! Never reloaded from disk; a fresh run relies on the local store instead.

use crate::strategy::StrategyTable;

/// Package → base name pairing recorded once a strategy succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRecord {
    pub package: String,
    pub base: String,
    pub strategy: &'static str,
}

/// Success count for one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyCount {
    pub strategy: &'static str,
    pub successes: u32,
}

#[derive(Debug, Clone, Default)]
pub struct RunState {
    counts: Vec<StrategyCount>,
    records: Vec<ResolutionRecord>,
    unresolved: Vec<String>,
}

impl RunState {
    /// Zeroed counters for every strategy in `table`, in table order.
    pub fn new(table: &StrategyTable) -> Self {
        Self {
            counts: table
                .iter()
                .map(|s| StrategyCount {
                    strategy: s.name,
                    successes: 0,
                })
                .collect(),
            records: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    pub fn record_success(&mut self, strategy: &'static str, package: &str, base: &str) {
        match self.counts.iter_mut().find(|c| c.strategy == strategy) {
            Some(c) => c.successes += 1,
            None => self.counts.push(StrategyCount {
                strategy,
                successes: 1,
            }),
        }
        self.records.push(ResolutionRecord {
            package: package.to_string(),
            base: base.to_string(),
            strategy,
        });
    }

    pub fn record_unresolved(&mut self, package: &str) {
        self.unresolved.push(package.to_string());
    }

    pub fn counts(&self) -> &[StrategyCount] {
        &self.counts
    }

    pub fn successes(&self, strategy: &str) -> u32 {
        self.counts
            .iter()
            .find(|c| c.strategy == strategy)
            .map(|c| c.successes)
            .unwrap_or(0)
    }

    pub fn records(&self) -> &[ResolutionRecord] {
        &self.records
    }

    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn base_for(&self, package: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.package == package)
            .map(|r| r.base.as_str())
    }
}
