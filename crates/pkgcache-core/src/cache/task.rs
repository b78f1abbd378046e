//! Per-package cache task.

use std::ops::AddAssign;

use crate::package::PackageId;
use crate::source::{ArchiveSource, PackageDefinition};
use crate::url_model::{link_name_for_url, sanitize_file_name};

use super::fetch::SourceOutcome;
use super::ArchiveCache;

/// Source counts for a package or a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    pub fetched: usize,
    pub up_to_date: usize,
    pub no_checksum: usize,
    pub failed: usize,
}

impl AddAssign for SourceStats {
    fn add_assign(&mut self, rhs: Self) {
        self.fetched += rhs.fetched;
        self.up_to_date += rhs.up_to_date;
        self.no_checksum += rhs.no_checksum;
        self.failed += rhs.failed;
    }
}

/// Result of caching one package. Empty `errors` means complete success,
/// including the case where there was nothing to cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    pub id: PackageId,
    pub errors: Vec<String>,
    pub stats: SourceStats,
}

impl PackageReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

fn fallback_name(source: &ArchiveSource) -> String {
    source
        .primary_checksum()
        .map(|c| c.hex().to_string())
        .unwrap_or_else(|| "archive".to_string())
}

impl ArchiveCache {
    /// Cache the archive and then every extra source of `definition`, in
    /// declaration order. An absent definition is nothing to do.
    pub async fn cache_package(
        &self,
        id: &PackageId,
        definition: Option<&PackageDefinition>,
    ) -> PackageReport {
        let mut report = PackageReport {
            id: id.clone(),
            errors: Vec::new(),
            stats: SourceStats::default(),
        };
        let Some(definition) = definition else {
            return report;
        };
        tracing::debug!(package = %id, sources = definition.source_count(), "caching package");

        let label = id.to_string();
        if let Some(archive) = &definition.archive {
            let name = link_name_for_url(&archive.url).unwrap_or_else(|| fallback_name(archive));
            self.run_source(&mut report, &label, &name, archive).await;
        }
        for extra in &definition.extra_sources {
            let label = format!("{}/{}", id, extra.name);
            let name = Some(sanitize_file_name(&extra.name))
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| fallback_name(&extra.source));
            self.run_source(&mut report, &label, &name, &extra.source).await;
        }
        report
    }

    async fn run_source(
        &self,
        report: &mut PackageReport,
        label: &str,
        link_name: &str,
        source: &ArchiveSource,
    ) {
        match self.cache_source(&report.id, label, link_name, source).await {
            Ok(SourceOutcome::NoChecksum) => report.stats.no_checksum += 1,
            Ok(SourceOutcome::UpToDate) => report.stats.up_to_date += 1,
            Ok(SourceOutcome::Fetched { .. }) => report.stats.fetched += 1,
            Err(e) => {
                report.stats.failed += 1;
                report.errors.push(e.to_string());
            }
        }
    }
}
