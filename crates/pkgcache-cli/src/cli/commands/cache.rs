//! `pkgcache cache`: populate the archive cache from a repository.

use anyhow::{bail, Result};
use pkgcache_core::config::PkgCacheConfig;
use pkgcache_core::repo::{register_cache_dir, Registration, Repository};
use pkgcache_core::retry::RetryPolicy;
use pkgcache_core::scheduler::{populate_cache, CacheOptions};
use pkgcache_core::transport::CurlTransport;
use std::sync::Arc;
use std::time::Instant;

use crate::cli::CacheArgs;

/// Runs the batch, prints the error summary and registers the cache in the
/// repository descriptor. Returns `false` only when `--fail-on-error` is set
/// and some package failed.
pub async fn run_cache(cfg: &PkgCacheConfig, args: CacheArgs) -> Result<bool> {
    if !args.repo.is_dir() {
        bail!("repository root {} is not a directory", args.repo.display());
    }
    let repo = Repository::open(&args.repo);
    let opts = CacheOptions {
        cache_dir: args
            .cache_dir
            .unwrap_or_else(|| args.repo.join(&cfg.cache_dir_name)),
        jobs: args.jobs.unwrap_or(cfg.jobs).max(1),
        link_dir: args.link,
    };
    let transport = CurlTransport::new(
        cfg.transfer_or_default(),
        RetryPolicy::from(&cfg.retry_or_default()),
    );

    let started = Instant::now();
    let summary = populate_cache(&repo, &opts, Arc::new(transport)).await?;
    println!("{} in {:.1}s", summary, started.elapsed().as_secs_f64());
    if let Some(report) = summary.error_report() {
        print!("{}", report);
    }

    if !args.no_repo_update {
        match register_cache_dir(repo.root(), &opts.cache_dir)? {
            Registration::Added(location) => {
                println!("Registered {} in {}", location, repo.descriptor_path().display());
            }
            Registration::AlreadyPresent(_) | Registration::OutsideRepository => {}
        }
    }

    Ok(!(args.fail_on_error && summary.has_errors()))
}
