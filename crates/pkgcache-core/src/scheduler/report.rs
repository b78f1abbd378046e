//! Aggregate result of a batch run.

use std::collections::BTreeMap;
use std::fmt;

use crate::cache::{PackageReport, SourceStats};
use crate::package::PackageId;

/// Failure strings per package. Packages without failures are never keys.
pub type ErrorMap = BTreeMap<PackageId, Vec<String>>;

/// Folds `other` into `into`. Keys are unique per run; should one repeat,
/// its failure lists are concatenated.
pub fn merge_errors(mut into: ErrorMap, other: ErrorMap) -> ErrorMap {
    for (id, errors) in other {
        into.entry(id).or_default().extend(errors);
    }
    into
}

/// Counters and failures of one `populate_cache` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub packages: usize,
    pub stats: SourceStats,
    pub errors: ErrorMap,
}

impl RunSummary {
    /// Adds one finished package.
    pub fn absorb(mut self, report: PackageReport) -> Self {
        self.packages += 1;
        self.stats += report.stats;
        if !report.is_ok() {
            self.errors = merge_errors(self.errors, ErrorMap::from([(report.id, report.errors)]));
        }
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Operator-facing failure listing grouped by package, or `None` when
    /// every package succeeded.
    pub fn error_report(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        let mut out = String::from("Got some errors while processing:\n");
        for (id, errors) in &self.errors {
            out.push_str(&format!("  {}\n", id));
            for e in errors {
                out.push_str(&format!("    {}\n", e));
            }
        }
        Some(out)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} packages: {} fetched, {} up to date, {} without checksum, {} failed",
            self.packages,
            self.stats.fetched,
            self.stats.up_to_date,
            self.stats.no_checksum,
            self.stats.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: &str, errors: &[&str], stats: SourceStats) -> PackageReport {
        PackageReport {
            id: id.parse().unwrap(),
            errors: errors.iter().map(|s| s.to_string()).collect(),
            stats,
        }
    }

    fn failed(n: usize) -> SourceStats {
        SourceStats {
            failed: n,
            ..SourceStats::default()
        }
    }

    #[test]
    fn successful_packages_are_not_keys() {
        let ok = SourceStats {
            fetched: 1,
            ..SourceStats::default()
        };
        let summary = RunSummary::default()
            .absorb(report("a.1", &[], ok))
            .absorb(report("b.2", &["b.2: no valid source found (x)"], failed(1)));
        assert_eq!(summary.packages, 2);
        assert_eq!(summary.stats.fetched, 1);
        assert_eq!(summary.stats.failed, 1);
        assert_eq!(summary.errors.len(), 1);
        assert!(summary.errors.contains_key(&PackageId::new("b", "2")));
    }

    #[test]
    fn fold_order_does_not_matter() {
        let reports = vec![
            report("c.1", &["c"], failed(1)),
            report("a.1", &["a1", "a2"], failed(2)),
            report("b.1", &[], SourceStats::default()),
        ];
        let forward = reports
            .iter()
            .cloned()
            .fold(RunSummary::default(), RunSummary::absorb);
        let backward = reports
            .into_iter()
            .rev()
            .fold(RunSummary::default(), RunSummary::absorb);
        assert_eq!(forward, backward);
    }

    #[test]
    fn merge_concatenates_duplicate_keys() {
        let id = PackageId::new("a", "1");
        let a = ErrorMap::from([(id.clone(), vec!["x".to_string()])]);
        let b = ErrorMap::from([(id.clone(), vec!["y".to_string()])]);
        let merged = merge_errors(a, b);
        assert_eq!(merged[&id], ["x", "y"]);
    }

    #[test]
    fn error_report_groups_by_package() {
        let summary = RunSummary::default()
            .absorb(report("zlib.1.2", &["zlib.1.2: no valid source found (u: HTTP 404)"], failed(1)))
            .absorb(report("bash.5.1", &["bash.5.1/fix.patch: e1"], failed(1)));
        assert_eq!(
            summary.error_report().unwrap(),
            "Got some errors while processing:\n  bash.5.1\n    bash.5.1/fix.patch: e1\n  zlib.1.2\n    zlib.1.2: no valid source found (u: HTTP 404)\n"
        );
        assert!(RunSummary::default().error_report().is_none());
    }
}
