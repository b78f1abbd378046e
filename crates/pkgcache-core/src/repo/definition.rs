//! `package.toml` reader.
//!
//! Only the fields relevant to caching are read; anything else in the file is
//! ignored.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::checksum::Checksum;
use crate::source::{ArchiveSource, ExtraSource, PackageDefinition};

/// File name of a package definition inside its package directory.
pub const DEFINITION_FILE: &str = "package.toml";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawDefinition {
    url: Option<RawSource>,
    #[serde(default)]
    extra_source: Vec<RawExtraSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    src: String,
    #[serde(default)]
    mirrors: Vec<String>,
    #[serde(default)]
    checksum: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawExtraSource {
    name: String,
    #[serde(flatten)]
    source: RawSource,
}

impl RawSource {
    fn into_source(self) -> Result<ArchiveSource> {
        let checksums = self
            .checksum
            .iter()
            .map(|c| c.parse::<Checksum>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("checksum of {}", self.src))?;
        Ok(ArchiveSource {
            url: self.src,
            mirrors: self.mirrors,
            checksums,
        })
    }
}

/// Parse definition text.
pub fn parse_definition(text: &str) -> Result<PackageDefinition> {
    let raw: RawDefinition = toml::from_str(text).context("parse package definition")?;
    let archive = raw.url.map(RawSource::into_source).transpose()?;
    let extra_sources = raw
        .extra_source
        .into_iter()
        .map(|e| {
            Ok(ExtraSource {
                name: e.name,
                source: e.source.into_source()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(PackageDefinition {
        archive,
        extra_sources,
    })
}

/// Read a definition file. `Ok(None)` if the file does not exist.
pub fn read_definition(path: &Path) -> Result<Option<PackageDefinition>> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    parse_definition(&text)
        .with_context(|| format!("in {}", path.display()))
        .map(Some)
}
