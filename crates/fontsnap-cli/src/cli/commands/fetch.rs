//! `fontsnap run` – fetch the listing and resolve every matching package.

use anyhow::{Context, Result};
use fontsnap_core::config::FontsnapConfig;
use fontsnap_core::engine::EngineError;
use fontsnap_core::fetch::{CurlFetcher, FetchError};
use fontsnap_core::listing;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::session::resolve_packages;
use crate::cli::interrupt;

pub async fn run_fetch(cfg: FontsnapConfig, limit: Option<usize>) -> Result<()> {
    let abort = Arc::new(AtomicBool::new(false));
    interrupt::watch(Arc::clone(&abort));

    tokio::task::spawn_blocking(move || -> Result<()> {
        let fetcher = CurlFetcher::new(cfg.transport_options(), Arc::clone(&abort));
        let packages =
            listing::fetch_listing(&fetcher, &cfg.listing_url, &cfg.package_prefix, limit)
                .map_err(listing_interrupted)?;
        if packages.is_empty() {
            println!("No packages matching '{}'.", cfg.package_prefix);
            return Ok(());
        }
        resolve_packages(&cfg, &fetcher, abort, &packages)?;
        Ok(())
    })
    .await
    .context("resolver task panicked")?
}

/// Ctrl-C during the listing download ends the run the same way as during
/// resolution: nothing resolved yet, so nothing to checkpoint.
fn listing_interrupted(err: anyhow::Error) -> anyhow::Error {
    match err.downcast_ref::<FetchError>() {
        Some(FetchError::Aborted) => EngineError::Interrupted.into(),
        _ => err,
    }
}
