//! libcurl-backed `Fetcher`.

use super::{FetchError, Fetcher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Connection tuning for the curl transport.
#[derive(Debug, Clone, Copy)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    /// Abort if throughput stays below 1 KiB/s for this long.
    pub low_speed_time: Duration,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            low_speed_time: Duration::from_secs(60),
        }
    }
}

/// Sequential GET over libcurl. A new handle per request; requests are
/// paced by the engine, so there is nothing to gain from reuse.
pub struct CurlFetcher {
    options: TransportOptions,
    abort: Arc<AtomicBool>,
}

impl CurlFetcher {
    pub fn new(options: TransportOptions, abort: Arc<AtomicBool>) -> Self {
        Self { options, abort }
    }
}

impl Fetcher for CurlFetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if self.abort.load(Ordering::Relaxed) {
            return Err(FetchError::Aborted);
        }

        let mut body = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(self.options.low_speed_time)?;
        easy.fail_on_error(false)?;
        // Needed for the progress callback to fire.
        easy.progress(true)?;

        let abort = Arc::clone(&self.abort);
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.progress_function(move |_, _, _, _| !abort.load(Ordering::Relaxed))?;
            if let Err(e) = transfer.perform() {
                if e.is_aborted_by_callback() {
                    return Err(FetchError::Aborted);
                }
                return Err(FetchError::Curl(e));
            }
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        tracing::debug!(url, bytes = body.len(), "GET ok");
        Ok(body)
    }
}
