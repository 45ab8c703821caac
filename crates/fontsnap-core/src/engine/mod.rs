//! Retrieval engine: resolve a package name to an upstream snapshot.
//!
//! Per package: consult the local store first, then walk the strategy table
//! in order, GETting `<snapshot_base_url>/<base>.tar.gz` for each eligible
//! candidate until one succeeds. 404 advances to the next strategy; any
//! other failure aborts the whole run. Requests are strictly sequential and
//! paced by a fixed delay after each round trip.

mod error;
mod outcome;

pub use error::EngineError;
pub use outcome::{AttemptOutcome, SkipReason};

use crate::cache::ResolutionCache;
use crate::checkpoint::{CheckpointGuard, CheckpointSummary, CheckpointWriter};
use crate::classify::{classify, Disposition};
use crate::fetch::Fetcher;
use crate::pace::Pacer;
use crate::state::RunState;
use crate::store::LocalStore;
use crate::strategy::{Strategy, StrategyTable};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct Engine<'a, F> {
    table: &'a StrategyTable,
    store: &'a LocalStore,
    fetcher: F,
    snapshot_base_url: String,
    pacer: Pacer,
    abort: Arc<AtomicBool>,
}

impl<'a, F: Fetcher> Engine<'a, F> {
    pub fn new(
        table: &'a StrategyTable,
        store: &'a LocalStore,
        fetcher: F,
        snapshot_base_url: impl Into<String>,
    ) -> Self {
        let snapshot_base_url: String = snapshot_base_url.into();
        Self {
            table,
            store,
            fetcher,
            snapshot_base_url: snapshot_base_url.trim_end_matches('/').to_string(),
            pacer: Pacer::none(),
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Share an abort token (set from a signal handler) with the engine.
    pub fn with_abort(mut self, abort: Arc<AtomicBool>) -> Self {
        self.abort = abort;
        self
    }

    pub fn table(&self) -> &StrategyTable {
        self.table
    }

    pub fn snapshot_url(&self, base: &str) -> String {
        format!("{}/{}.tar.gz", self.snapshot_base_url, base)
    }

    /// Resolve one package, recording the result in `state`.
    ///
    /// Returns `AlreadyLocal`, `Retrieved` or `Exhausted`. Fatal fetch
    /// failures and interrupts are returned as errors; the caller owns
    /// flushing `state`.
    pub fn resolve(
        &self,
        state: &mut RunState,
        package: &str,
    ) -> Result<AttemptOutcome, EngineError> {
        self.check_abort()?;

        if let Some(hit) = ResolutionCache::new(self.store).lookup(self.table, package) {
            tracing::info!(package, base = %hit.base, strategy = hit.strategy.name, "already local");
            state.record_success(hit.strategy.name, package, &hit.base);
            return Ok(AttemptOutcome::AlreadyLocal {
                strategy: hit.strategy.name,
                base: hit.base,
            });
        }

        tracing::info!(package, "trying strategies");
        let mut tried: HashSet<String> = HashSet::new();
        for strategy in self.table.iter() {
            let outcome = self.attempt(strategy, package, &mut tried)?;
            match &outcome {
                AttemptOutcome::Retrieved { strategy, base } => {
                    state.record_success(*strategy, package, base);
                    self.pace()?;
                    return Ok(outcome);
                }
                AttemptOutcome::NotFound { .. } => self.pace()?,
                _ => {}
            }
        }

        tracing::warn!(package, "no strategy matched");
        state.record_unresolved(package);
        Ok(AttemptOutcome::Exhausted)
    }

    /// One strategy for one package: skip, 404, or retrieved into the store.
    fn attempt(
        &self,
        strategy: &Strategy,
        package: &str,
        tried: &mut HashSet<String>,
    ) -> Result<AttemptOutcome, EngineError> {
        if !strategy.is_eligible(package) {
            return Ok(AttemptOutcome::Skipped {
                strategy: strategy.name,
                reason: SkipReason::Ineligible,
            });
        }
        let base = strategy.candidate(package);
        let url = self.snapshot_url(&base);
        if tried.contains(&url) {
            return Ok(AttemptOutcome::Skipped {
                strategy: strategy.name,
                reason: SkipReason::UrlAlreadyTried,
            });
        }

        self.check_abort()?;
        match self.fetcher.get(&url) {
            Ok(bytes) => {
                self.store
                    .extract_tar_gz(&bytes)
                    .map_err(|source| EngineError::Store {
                        base: base.clone(),
                        source,
                    })?;
                tracing::info!(package, %url, strategy = strategy.name, "retrieved");
                Ok(AttemptOutcome::Retrieved {
                    strategy: strategy.name,
                    base,
                })
            }
            Err(e) => match classify(&e) {
                Disposition::NotFound => {
                    tracing::debug!(package, %url, strategy = strategy.name, "not found");
                    tried.insert(url.clone());
                    Ok(AttemptOutcome::NotFound {
                        strategy: strategy.name,
                        url,
                    })
                }
                Disposition::Fatal => {
                    tracing::error!(package, %url, "fatal fetch error: {}", e);
                    Err(EngineError::Fatal { url, source: e })
                }
                Disposition::Interrupted => Err(EngineError::Interrupted),
            },
        }
    }

    /// Resolve every package in order, checkpointing on every exit path.
    ///
    /// `observe` sees each package's terminal outcome. The checkpoint is
    /// flushed on normal completion and also when a fatal error or interrupt
    /// ends the run early. If that early flush fails, the flush error is
    /// returned instead of the `EngineError`, so callers never report an
    /// abort as checkpointed when nothing was written.
    pub fn run<I, S>(
        &self,
        packages: I,
        writer: &CheckpointWriter,
        mut observe: impl FnMut(&str, &AttemptOutcome),
    ) -> anyhow::Result<CheckpointSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut guard = CheckpointGuard::new(writer, RunState::new(self.table));
        for package in packages {
            let package = package.as_ref();
            match self.resolve(guard.state_mut(), package) {
                Ok(outcome) => observe(package, &outcome),
                Err(e) => {
                    return match guard.finish() {
                        Ok(_) => Err(e.into()),
                        Err(flush) => Err(flush.context(format!(
                            "checkpoint flush failed after run stopped ({})",
                            e
                        ))),
                    };
                }
            }
        }
        guard.finish()
    }

    fn pace(&self) -> Result<(), EngineError> {
        self.pacer
            .wait(&self.abort)
            .map_err(|_| EngineError::Interrupted)
    }

    fn check_abort(&self) -> Result<(), EngineError> {
        if self.abort.load(Ordering::Relaxed) {
            return Err(EngineError::Interrupted);
        }
        Ok(())
    }
}
