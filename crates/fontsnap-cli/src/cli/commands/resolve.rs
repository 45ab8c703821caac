//! `fontsnap resolve NAME...` – resolve specific packages, no listing fetch.

use anyhow::{Context, Result};
use fontsnap_core::config::FontsnapConfig;
use fontsnap_core::fetch::CurlFetcher;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::session::resolve_packages;
use crate::cli::interrupt;

pub async fn run_resolve(cfg: FontsnapConfig, names: Vec<String>) -> Result<()> {
    for name in &names {
        if !name.starts_with(&cfg.package_prefix) {
            tracing::warn!(name = %name, prefix = %cfg.package_prefix, "name does not match package prefix");
        }
    }

    let abort = Arc::new(AtomicBool::new(false));
    interrupt::watch(Arc::clone(&abort));

    tokio::task::spawn_blocking(move || -> Result<()> {
        let fetcher = CurlFetcher::new(cfg.transport_options(), Arc::clone(&abort));
        resolve_packages(&cfg, &fetcher, abort, &names)?;
        Ok(())
    })
    .await
    .context("resolver task panicked")?
}
