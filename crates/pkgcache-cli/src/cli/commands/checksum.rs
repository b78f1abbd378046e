//! `pkgcache checksum`: digest a file for use in a package definition.

use anyhow::Result;
use pkgcache_core::checksum::{digest_path, Checksum, HashKind};
use std::path::Path;

/// Prints `<kind>=<hex>  <path>`.
pub fn run_checksum(path: &Path, kind: HashKind) -> Result<()> {
    let hex = digest_path(path, kind)?;
    let checksum = Checksum::new(kind, &hex)?;
    println!("{}  {}", checksum, path.display());
    Ok(())
}
