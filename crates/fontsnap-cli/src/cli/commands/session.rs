//! Shared engine setup for `run` and `resolve`: one sequential pass over
//! `packages` with the checkpoint written on every exit path.

use anyhow::Result;
use fontsnap_core::checkpoint::{CheckpointSummary, CheckpointWriter};
use fontsnap_core::config::FontsnapConfig;
use fontsnap_core::engine::{AttemptOutcome, Engine};
use fontsnap_core::fetch::CurlFetcher;
use fontsnap_core::pace::Pacer;
use fontsnap_core::store::LocalStore;
use fontsnap_core::strategy::StrategyTable;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(super) fn resolve_packages(
    cfg: &FontsnapConfig,
    fetcher: &CurlFetcher,
    abort: Arc<AtomicBool>,
    packages: &[String],
) -> Result<CheckpointSummary> {
    let table = StrategyTable::standard();
    let store = LocalStore::new(&cfg.store_dir);
    let writer = CheckpointWriter::new(&cfg.unresolved_path, &cfg.mapping_path);
    let engine = Engine::new(&table, &store, fetcher, cfg.snapshot_base_url.as_str())
        .with_pacer(Pacer::new(cfg.pace()))
        .with_abort(abort);

    tracing::info!(
        packages = packages.len(),
        store = %store.root().display(),
        "resolving packages"
    );
    engine.run(packages, &writer, |package, outcome| match outcome {
        AttemptOutcome::AlreadyLocal { base, strategy } => {
            println!("skip     {} -> {} ({})", package, base, strategy)
        }
        AttemptOutcome::Retrieved { base, strategy } => {
            println!("fetched  {} -> {} ({})", package, base, strategy)
        }
        AttemptOutcome::Exhausted => println!("missing  {}", package),
        other => tracing::debug!(package, "non-terminal outcome: {:?}", other),
    })
}
