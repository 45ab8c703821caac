//! Classify a failed snapshot fetch: wrong candidate name, or stop the run.
//!
//! Only a confirmed 404 is explorable. Anything else (429, 5xx, 403,
//! connection trouble) halts the run so counters are not polluted by
//! throttled responses being read as "absent".

use crate::fetch::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Candidate does not exist upstream; try the next strategy.
    NotFound,
    /// Service or transport failure; abort the whole run.
    Fatal,
    /// The abort token was set while the request was in flight.
    Interrupted,
}

pub fn classify_http_status(code: u32) -> Disposition {
    match code {
        404 => Disposition::NotFound,
        _ => Disposition::Fatal,
    }
}

pub fn classify(e: &FetchError) -> Disposition {
    match e {
        FetchError::Http(code) => classify_http_status(*code),
        FetchError::Curl(_) => Disposition::Fatal,
        FetchError::Aborted => Disposition::Interrupted,
    }
}
