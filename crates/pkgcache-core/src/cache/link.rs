//! Link farm: `<link_dir>/<name.version>/<file>` -> cache entry.

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

use crate::package::PackageId;

/// Path from directory `from` to `to`, both absolute.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for c in &to[common..] {
        rel.push(c.as_os_str());
    }
    rel
}

/// Create (or replace) the relative symlink for `package`'s `name` pointing
/// at `target`. Returns the link path.
pub fn link_entry(link_dir: &Path, package: &PackageId, name: &str, target: &Path) -> Result<PathBuf> {
    let dir = link_dir.join(package.to_string());
    std::fs::create_dir_all(&dir).with_context(|| format!("create dir {}", dir.display()))?;
    let link = dir.join(name);

    if std::fs::symlink_metadata(&link).is_ok() {
        std::fs::remove_file(&link).with_context(|| format!("remove {}", link.display()))?;
    }

    // Resolve `..` and symlinks the way the kernel will when following the link.
    let from = std::fs::canonicalize(&dir)
        .with_context(|| format!("resolve link dir {}", dir.display()))?;
    let to = std::fs::canonicalize(target)
        .with_context(|| format!("resolve cache entry {}", target.display()))?;
    let rel = relative_path(&from, &to);
    symlink(&rel, &link)?;
    Ok(link)
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link)
        .with_context(|| format!("symlink {} -> {}", link.display(), target.display()))
}

#[cfg(not(unix))]
fn symlink(_target: &Path, link: &Path) -> Result<()> {
    anyhow::bail!("cannot create {}: symlinks are not supported on this platform", link.display())
}
