//! Fetch error type used for failure classification.

use std::fmt;

/// Error returned by a single GET (curl failure, HTTP error, or user abort).
/// Kept separate from anyhow so the classifier can inspect it.
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, DNS, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Transfer cancelled because the abort token was set.
    Aborted,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
            FetchError::Aborted => write!(f, "transfer aborted"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Http(_) | FetchError::Aborted => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Curl(e)
    }
}
