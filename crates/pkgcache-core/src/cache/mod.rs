//! Content-addressed archive cache.
//!
//! [`ArchiveCache`] owns the cache root, the optional link farm and the
//! transport. It runs the fetch-and-verify job for single sources
//! ([`ArchiveCache::cache_source`]) and the per-package task that walks a
//! package's archive and extra sources ([`ArchiveCache::cache_package`]).

mod error;
mod fetch;
mod link;
mod task;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::checksum::{content_path, Checksum};
use crate::transport::Transport;

pub use error::SourceError;
pub use fetch::SourceOutcome;
pub use link::{link_entry, relative_path};
pub use task::{PackageReport, SourceStats};

/// Cache root plus everything needed to fill it.
#[derive(Clone)]
pub struct ArchiveCache {
    root: PathBuf,
    link_dir: Option<PathBuf>,
    transport: Arc<dyn Transport>,
}

impl ArchiveCache {
    pub fn new(root: impl Into<PathBuf>, transport: Arc<dyn Transport>) -> Self {
        Self {
            root: root.into(),
            link_dir: None,
            transport,
        }
    }

    /// Also maintain human-readable symlinks under `link_dir`.
    pub fn with_link_dir(mut self, link_dir: impl Into<PathBuf>) -> Self {
        self.link_dir = Some(link_dir.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of the entry addressed by `checksum`.
    pub fn entry_path(&self, checksum: &Checksum) -> PathBuf {
        self.root.join(content_path(checksum))
    }
}

impl std::fmt::Debug for ArchiveCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveCache")
            .field("root", &self.root)
            .field("link_dir", &self.link_dir)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testutil;
