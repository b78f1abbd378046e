//! Package repository on disk.
//!
//! Layout:
//! - `<root>/repo.toml`: repository descriptor (see [`descriptor`])
//! - `<root>/packages/<name>/<name>.<version>/package.toml`: package definitions

pub mod definition;
pub mod descriptor;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::package::PackageId;
use crate::source::PackageDefinition;

pub use descriptor::{register_cache_dir, RepoDescriptor, Registration};

/// Directory under the root that holds package definitions.
pub const PACKAGES_DIR: &str = "packages";

/// One package directory found in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub id: PackageId,
    /// `<root>/packages/<name>/<name>.<version>`
    pub dir: PathBuf,
}

/// A repository rooted at a directory.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.root.join(descriptor::DESCRIPTOR_FILE)
    }

    /// Lists every package directory, sorted by package id.
    ///
    /// A missing `packages/` directory is an empty repository. Directories that
    /// do not look like `<name>/<name>.<version>` are skipped.
    pub fn packages(&self) -> Result<Vec<PackageEntry>> {
        let packages_dir = self.root.join(PACKAGES_DIR);
        if !packages_dir.is_dir() {
            tracing::debug!(path = %packages_dir.display(), "no packages directory");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&packages_dir).min_depth(2).max_depth(2) {
            let entry = entry.with_context(|| format!("walk {}", packages_dir.display()))?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(dir_name) = entry.file_name().to_str() else {
                continue;
            };
            let id: PackageId = match dir_name.parse() {
                Ok(id) => id,
                Err(e) => {
                    tracing::debug!("skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            };
            let parent = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .and_then(|n| n.to_str());
            if parent != Some(id.name.as_str()) {
                tracing::warn!(
                    "skipping {}: package {} is not under packages/{}/",
                    entry.path().display(),
                    id,
                    id.name
                );
                continue;
            }
            entries.push(PackageEntry {
                id,
                dir: entry.into_path(),
            });
        }
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries.dedup_by(|a, b| a.id == b.id);
        Ok(entries)
    }

    /// Reads the definition of one package. `None` when the definition is
    /// absent or unreadable; that is reported here and not as a cache failure.
    pub fn read_definition(&self, entry: &PackageEntry) -> Option<PackageDefinition> {
        let path = entry.dir.join(definition::DEFINITION_FILE);
        match definition::read_definition(&path) {
            Ok(def) => def,
            Err(e) => {
                tracing::warn!(package = %entry.id, "unreadable definition: {:#}", e);
                None
            }
        }
    }
}
