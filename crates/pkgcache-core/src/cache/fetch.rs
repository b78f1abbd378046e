//! Fetch-and-verify job for one archive source.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::checksum::{self, Checksum};
use crate::package::PackageId;
use crate::source::ArchiveSource;
use crate::storage::StagedFile;

use super::error::SourceError;
use super::link::link_entry;
use super::ArchiveCache;

/// Successful result of [`ArchiveCache::cache_source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// No checksum declared: the source is never cached.
    NoChecksum,
    /// A valid entry already existed; nothing was downloaded.
    UpToDate,
    /// Downloaded from `url` and stored.
    Fetched { url: String },
}

/// State of the cache entry before a fetch.
enum Existing {
    Missing,
    Valid,
    /// Did not match its checksum and was deleted.
    Removed,
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context("blocking task join")?
}

impl ArchiveCache {
    /// Make sure the entry for `source` exists in the cache.
    ///
    /// The entry is addressed by the first checksum. An existing entry that
    /// still matches it is left alone. Otherwise the primary URL and then each
    /// mirror are tried in order until a download matches any declared
    /// checksum; it is then stored under the first checksum's address.
    ///
    /// `label` names the source in diagnostics; `link_name` is the file name
    /// used in the link farm, if one is configured.
    pub async fn cache_source(
        &self,
        package: &PackageId,
        label: &str,
        link_name: &str,
        source: &ArchiveSource,
    ) -> Result<SourceOutcome, SourceError> {
        let Some(first) = source.primary_checksum() else {
            tracing::warn!(
                package = %package,
                "{}: no checksum declared for {}, not caching",
                label,
                source.url
            );
            return Ok(SourceOutcome::NoChecksum);
        };
        let dest = self.entry_path(first);

        let outcome = if self.is_up_to_date(label, &dest, first).await {
            tracing::debug!("{}: {} up to date", label, first);
            SourceOutcome::UpToDate
        } else {
            let url = self.download(label, source, &dest).await?;
            tracing::info!("{}: cached {} from {}", label, first, url);
            SourceOutcome::Fetched { url }
        };

        if let Some(link_dir) = &self.link_dir {
            if let Err(e) = link_entry(link_dir, package, link_name, &dest) {
                tracing::warn!("{}: could not link {}: {:#}", label, link_name, e);
            }
        }
        Ok(outcome)
    }

    /// True if `dest` exists and matches `first`. A mismatching entry is removed.
    async fn is_up_to_date(&self, label: &str, dest: &Path, first: &Checksum) -> bool {
        let path = dest.to_path_buf();
        let checksum = first.clone();
        let state = blocking(move || {
            if !path.is_file() {
                return Ok(Existing::Missing);
            }
            if checksum::verify_file(&path, &checksum)? {
                return Ok(Existing::Valid);
            }
            std::fs::remove_file(&path)
                .with_context(|| format!("remove corrupt {}", path.display()))?;
            Ok(Existing::Removed)
        })
        .await;

        match state {
            Ok(Existing::Valid) => true,
            Ok(Existing::Missing) => false,
            Ok(Existing::Removed) => {
                tracing::warn!("{}: cached {} was corrupt, fetching again", label, dest.display());
                false
            }
            Err(e) => {
                tracing::warn!("{}: could not check {}: {:#}", label, dest.display(), e);
                false
            }
        }
    }

    /// Try each URL in order; returns the URL that produced a valid artifact.
    async fn download(
        &self,
        label: &str,
        source: &ArchiveSource,
        dest: &Path,
    ) -> Result<String, SourceError> {
        let mut attempts = Vec::new();
        for url in source.urls() {
            let staged = StagedFile::create(&self.root)
                .map_err(|e| SourceError::storage(label, &e))?;

            if let Err(e) = self.transport.fetch(url, staged.path()).await {
                tracing::debug!("{}: {} failed: {}", label, url, e);
                attempts.push(format!("{}: {}", url, e));
                continue;
            }

            let path: PathBuf = staged.path().to_path_buf();
            let checksums = source.checksums.clone();
            match blocking(move || checksum::matches_any(&path, &checksums)).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!("{}: {} checksum mismatch", label, url);
                    attempts.push(format!("{}: checksum mismatch", url));
                    continue;
                }
                Err(e) => {
                    attempts.push(format!("{}: {:#}", url, e));
                    continue;
                }
            }

            staged
                .commit(dest)
                .map_err(|e| SourceError::storage(label, &e))?;
            return Ok(url.to_string());
        }

        Err(SourceError::Unavailable {
            label: label.to_string(),
            attempts,
        })
    }
}
