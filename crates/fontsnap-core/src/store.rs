//! Local snapshot store: one subdirectory per upstream base name, created
//! by extracting the snapshot tarball into the store root.

use flate2::read::GzDecoder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, base: &str) -> PathBuf {
        self.root.join(base)
    }

    /// True if something already exists under `base` in the store.
    pub fn contains(&self, base: &str) -> bool {
        // Empty or path-like candidates would resolve to the root or outside it.
        if base.is_empty() || base.contains('/') || base == "." || base == ".." {
            return false;
        }
        self.path_for(base).exists()
    }

    /// Unpack a gzip-compressed tarball into the store root.
    ///
    /// AUR snapshots carry a single top-level `<base>/` directory, so this
    /// implicitly creates the base name's subdirectory. Entries that would
    /// escape the root are refused by `tar`.
    pub fn extract_tar_gz(&self, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        tar::Archive::new(GzDecoder::new(bytes)).unpack(&self.root)
    }
}
