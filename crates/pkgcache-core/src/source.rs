//! Archive source descriptors declared by a package definition.

use crate::checksum::Checksum;

/// A downloadable artifact: primary URL, mirrors tried in order after it,
/// and the checksums the download must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSource {
    pub url: String,
    pub mirrors: Vec<String>,
    /// The first checksum decides the cache address; the others only verify.
    pub checksums: Vec<Checksum>,
}

impl ArchiveSource {
    pub fn new(url: impl Into<String>, checksums: Vec<Checksum>) -> Self {
        Self {
            url: url.into(),
            mirrors: Vec::new(),
            checksums,
        }
    }

    pub fn with_mirrors(mut self, mirrors: impl IntoIterator<Item = String>) -> Self {
        self.mirrors.extend(mirrors);
        self
    }

    /// Primary URL followed by the mirrors, in the order they are attempted.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.url.as_str()).chain(self.mirrors.iter().map(String::as_str))
    }

    /// The checksum that addresses this source in the cache, if any.
    pub fn primary_checksum(&self) -> Option<&Checksum> {
        self.checksums.first()
    }
}

/// An auxiliary file (patch, additional source) with its own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraSource {
    pub name: String,
    pub source: ArchiveSource,
}

/// The parts of a package definition the cache cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDefinition {
    pub archive: Option<ArchiveSource>,
    pub extra_sources: Vec<ExtraSource>,
}

impl PackageDefinition {
    /// Number of sources that would be processed for this package.
    pub fn source_count(&self) -> usize {
        usize::from(self.archive.is_some()) + self.extra_sources.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_primary_first_then_mirrors() {
        let src = ArchiveSource::new("https://a.example/x.tgz", Vec::new()).with_mirrors([
            "https://b.example/x.tgz".to_string(),
            "https://c.example/x.tgz".to_string(),
        ]);
        let urls: Vec<&str> = src.urls().collect();
        assert_eq!(
            urls,
            [
                "https://a.example/x.tgz",
                "https://b.example/x.tgz",
                "https://c.example/x.tgz"
            ]
        );
        assert!(src.primary_checksum().is_none());
    }

    #[test]
    fn source_count_includes_extras() {
        let def = PackageDefinition {
            archive: Some(ArchiveSource::new("https://a.example/x.tgz", Vec::new())),
            extra_sources: vec![ExtraSource {
                name: "fix.patch".to_string(),
                source: ArchiveSource::new("https://a.example/fix.patch", Vec::new()),
            }],
        };
        assert_eq!(def.source_count(), 2);
        assert_eq!(PackageDefinition::default().source_count(), 0);
    }
}
