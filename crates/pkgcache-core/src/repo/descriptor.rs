//! Repository descriptor (`repo.toml`) and cache registration.
//!
//! Clients read `archive-mirrors` to find caches to try before upstream URLs.
//! Every other key in the file is kept as-is when it is rewritten.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Component, Path};

/// File name of the descriptor at the repository root.
pub const DESCRIPTOR_FILE: &str = "repo.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RepoDescriptor {
    /// Cache locations, relative to the repository root, in preference order.
    #[serde(default)]
    pub archive_mirrors: Vec<String>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl RepoDescriptor {
    /// Load from `path`; a missing file is an empty descriptor.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
        };
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))
    }

    /// Writes to a temp file next to `path` and renames it over `path`, so
    /// readers see either the old or the new descriptor.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = toml::to_string_pretty(self).context("serialize repository descriptor")?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(".repo.toml")
            .suffix(".tmp")
            .tempfile_in(dir)
            .with_context(|| format!("create temp file in {}", dir.display()))?;
        tmp.write_all(data.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .with_context(|| format!("write {}", tmp.path().display()))?;
        tmp.persist(path).map_err(|e| {
            anyhow::Error::new(e.error).context(format!("replace {}", path.display()))
        })?;
        Ok(())
    }

    /// Appends `location` unless already present. Returns whether it was added.
    pub fn add_archive_mirror(&mut self, location: &str) -> bool {
        if self.archive_mirrors.iter().any(|m| m == location) {
            return false;
        }
        self.archive_mirrors.push(location.to_string());
        true
    }
}

/// Outcome of [`register_cache_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The location was appended and the descriptor written.
    Added(String),
    /// The location was already registered; nothing was written.
    AlreadyPresent(String),
    /// The cache directory is outside the repository root.
    OutsideRepository,
}

/// `cache_dir` relative to `repo_root` with `/` separators, or `None` when it
/// is not inside the root.
pub fn relative_location(repo_root: &Path, cache_dir: &Path) -> Option<String> {
    let root = std::path::absolute(repo_root).ok()?;
    let cache = std::path::absolute(cache_dir).ok()?;
    let rel = cache.strip_prefix(&root).ok()?;
    let mut parts = Vec::new();
    for c in rel.components() {
        match c {
            Component::Normal(s) => parts.push(s.to_str()?.to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Records `cache_dir` in the repository descriptor. Idempotent.
pub fn register_cache_dir(repo_root: &Path, cache_dir: &Path) -> Result<Registration> {
    let Some(location) = relative_location(repo_root, cache_dir) else {
        tracing::warn!(
            "cache directory {} is not inside repository {}; not registering it",
            cache_dir.display(),
            repo_root.display()
        );
        return Ok(Registration::OutsideRepository);
    };

    let path = repo_root.join(DESCRIPTOR_FILE);
    let mut descriptor = RepoDescriptor::load(&path)?;
    if !descriptor.add_archive_mirror(&location) {
        tracing::debug!("{} already lists archive mirror {}", path.display(), location);
        return Ok(Registration::AlreadyPresent(location));
    }
    descriptor.save(&path)?;
    tracing::info!("registered archive mirror {} in {}", location, path.display());
    Ok(Registration::Added(location))
}
