//! `populate_cache`: the batch entry point.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::{ArchiveCache, PackageReport};
use crate::config::DEFAULT_JOBS;
use crate::repo::{PackageEntry, Repository};
use crate::transport::Transport;

use super::order::scramble_order;
use super::parallel::reduce;
use super::report::RunSummary;

/// Where and how to populate the cache.
#[derive(Debug, Clone)]
pub struct CacheOptions {
    pub cache_dir: PathBuf,
    /// Maximum packages processed concurrently.
    pub jobs: usize,
    pub link_dir: Option<PathBuf>,
}

impl CacheOptions {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            jobs: DEFAULT_JOBS,
            link_dir: None,
        }
    }
}

/// Caches the archives of every package in `repo`.
///
/// Per-package failures end up in the returned summary and never abort the
/// run. Only a repository that cannot be listed, or a task that panics, is an
/// error.
pub async fn populate_cache(
    repo: &Repository,
    opts: &CacheOptions,
    transport: Arc<dyn Transport>,
) -> Result<RunSummary> {
    let mut entries = {
        let repo = repo.clone();
        tokio::task::spawn_blocking(move || repo.packages())
            .await
            .context("package listing task join")??
    };
    scramble_order(&mut entries, |e| &e.id);
    tracing::info!(
        packages = entries.len(),
        jobs = opts.jobs,
        cache = %opts.cache_dir.display(),
        "populating cache"
    );

    let mut cache = ArchiveCache::new(&opts.cache_dir, transport);
    if let Some(link_dir) = &opts.link_dir {
        cache = cache.with_link_dir(link_dir);
    }

    let task = |entry: PackageEntry| {
        let repo = repo.clone();
        let cache = cache.clone();
        async move {
            let id = entry.id.clone();
            let read = tokio::task::spawn_blocking(move || repo.read_definition(&entry));
            let definition = match read.await {
                Ok(def) => def,
                Err(e) => {
                    tracing::warn!(package = %id, "definition read task failed: {}", e);
                    None
                }
            };
            cache.cache_package(&id, definition.as_ref()).await
        }
    };
    let summary = reduce(
        opts.jobs,
        entries,
        RunSummary::default(),
        task,
        |acc, report: PackageReport| acc.absorb(report),
    )
    .await?;

    tracing::info!("{}", summary);
    Ok(summary)
}
