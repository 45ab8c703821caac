//! Transport: "GET a URL, return the body or a typed failure".
//!
//! The engine only depends on the `Fetcher` trait; `CurlFetcher` is the
//! libcurl-backed implementation used by the CLI.

mod http;
mod error;

pub use http::{CurlFetcher, TransportOptions};
pub use error::FetchError;

/// Blocking GET returning the full response body on a 2xx status.
pub trait Fetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).get(url)
    }
}
