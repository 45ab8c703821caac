//! Errors that end a run. A 404 for a candidate is not one of them; it only
//! advances the strategy cursor.

use crate::fetch::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Non-404 HTTP status or transport failure (throttling, outage).
    #[error("GET {url} failed: {source}")]
    Fatal {
        url: String,
        #[source]
        source: FetchError,
    },
    /// Snapshot was fetched but could not be unpacked into the store.
    #[error("extract snapshot for {base}: {source}")]
    Store {
        base: String,
        #[source]
        source: std::io::Error,
    },
    /// The abort token was set (Ctrl-C).
    #[error("interrupted")]
    Interrupted,
}

impl EngineError {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, EngineError::Interrupted)
    }
}
