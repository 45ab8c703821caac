//! AUR registry listing: gzip-compressed, one package name per line.

use crate::fetch::Fetcher;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::{BufRead, BufReader, Read};

/// Package names from a decoded listing that start with `prefix`.
/// Lines are trimmed; blank lines and non-UTF-8 lines are skipped.
pub fn filter_packages<R: Read>(reader: R, prefix: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for line in BufReader::new(reader).split(b'\n') {
        let line = line.context("read listing")?;
        let Ok(line) = std::str::from_utf8(&line) else {
            continue;
        };
        let name = line.trim();
        if !name.is_empty() && name.starts_with(prefix) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Fetch the gzip listing at `url` and return matching names, keeping at
/// most `limit` of them when given.
pub fn fetch_listing<F: Fetcher>(
    fetcher: &F,
    url: &str,
    prefix: &str,
    limit: Option<usize>,
) -> Result<Vec<String>> {
    let bytes = fetcher
        .get(url)
        .with_context(|| format!("fetch package listing {}", url))?;
    let mut names = filter_packages(GzDecoder::new(bytes.as_slice()), prefix)
        .context("decode package listing")?;
    if let Some(limit) = limit {
        names.truncate(limit);
    }
    tracing::info!(count = names.len(), prefix, "filtered package listing");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(text: &str) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(text.as_bytes()).unwrap();
        enc.finish().unwrap()
    }

    struct Static(Vec<u8>);

    impl Fetcher for Static {
        fn get(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn filters_by_prefix_and_trims() {
        let text = "firefox\nttf-fira-code\r\n  ttf-hack  \notf-inter\n\nttf-dejavu";
        let names = filter_packages(text.as_bytes(), "ttf-").unwrap();
        assert_eq!(names, vec!["ttf-fira-code", "ttf-hack", "ttf-dejavu"]);
    }

    #[test]
    fn prefix_must_be_at_start() {
        let names = filter_packages("python-ttf-tools\n".as_bytes(), "ttf-").unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn fetch_listing_decodes_gzip_and_limits() {
        let fetcher = Static(gzip("ttf-a\nvim\nttf-b\nttf-c\n"));
        let names = fetch_listing(&fetcher, "https://aur.example/packages.gz", "ttf-", Some(2)).unwrap();
        assert_eq!(names, vec!["ttf-a", "ttf-b"]);
    }

    #[test]
    fn fetch_listing_rejects_non_gzip() {
        let fetcher = Static(b"ttf-a\n".to_vec());
        assert!(fetch_listing(&fetcher, "https://aur.example/packages.gz", "ttf-", None).is_err());
    }
}
