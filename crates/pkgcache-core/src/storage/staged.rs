//! Staged temp file committed by atomic rename.

use anyhow::{Context, Result};
use std::path::Path;
use tempfile::NamedTempFile;

use super::{STAGING_DIR, TEMP_SUFFIX};

/// A temp file inside `<cache_root>/.staging`. Removed on drop unless committed.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
}

impl StagedFile {
    /// Create a new empty staged file for `cache_root`.
    pub fn create(cache_root: &Path) -> Result<Self> {
        let dir = cache_root.join(STAGING_DIR);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create staging dir {}", dir.display()))?;
        let file = tempfile::Builder::new()
            .prefix(".")
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&dir)
            .with_context(|| format!("create temp file in {}", dir.display()))?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Sync and atomically rename into `final_path`, creating its parent
    /// directories. Replaces any file already there; concurrent commits of the
    /// same content address leave one complete copy.
    pub fn commit(self, final_path: &Path) -> Result<()> {
        if let Some(parent) = final_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        self.file
            .as_file()
            .sync_all()
            .context("storage sync failed")?;
        self.file.persist(final_path).map_err(|e| {
            anyhow::Error::new(e.error).context(format!(
                "failed to rename into {}",
                final_path.display()
            ))
        })?;
        Ok(())
    }
}
