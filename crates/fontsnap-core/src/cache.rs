//! Resolution cache: the local store consulted before any network activity.
//!
//! A package is a cache hit if any eligible strategy's candidate already has
//! a directory in the store. Re-runs over a partially populated store are
//! therefore cheap and make no requests for names resolved earlier.

use crate::store::LocalStore;
use crate::strategy::{Strategy, StrategyTable};

/// First strategy whose candidate is already present locally.
#[derive(Debug, Clone)]
pub struct CacheHit<'t> {
    pub strategy: &'t Strategy,
    pub base: String,
}

pub struct ResolutionCache<'s> {
    store: &'s LocalStore,
}

impl<'s> ResolutionCache<'s> {
    pub fn new(store: &'s LocalStore) -> Self {
        Self { store }
    }

    pub fn lookup<'t>(&self, table: &'t StrategyTable, package: &str) -> Option<CacheHit<'t>> {
        table
            .iter()
            .filter(|s| s.is_eligible(package))
            .find_map(|strategy| {
                let base = strategy.candidate(package);
                self.store.contains(&base).then(|| CacheHit { strategy, base })
            })
    }
}
