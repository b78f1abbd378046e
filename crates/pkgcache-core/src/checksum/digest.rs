//! Streaming digests of files on disk.

use anyhow::{Context, Result};
use md5::Md5;
use sha2::{Digest, Sha256, Sha512};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{Checksum, HashKind};

const BUF_SIZE: usize = 64 * 1024;

fn digest_reader<D: Digest>(mut reader: impl Read, path: &Path) -> Result<String> {
    let mut hasher = D::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Compute the `kind` digest of a file as lowercase hex.
/// Reads in chunks to keep memory use bounded; suitable for large archives.
pub fn digest_path(path: &Path, kind: HashKind) -> Result<String> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    match kind {
        HashKind::Md5 => digest_reader::<Md5>(f, path),
        HashKind::Sha256 => digest_reader::<Sha256>(f, path),
        HashKind::Sha512 => digest_reader::<Sha512>(f, path),
    }
}

/// True if the file at `path` has the digest `checksum`.
pub fn verify_file(path: &Path, checksum: &Checksum) -> Result<bool> {
    Ok(digest_path(path, checksum.kind())? == checksum.hex())
}

/// True if the file matches at least one of `checksums`. Each hash kind is
/// computed at most once.
pub fn matches_any(path: &Path, checksums: &[Checksum]) -> Result<bool> {
    let mut computed: Vec<(HashKind, String)> = Vec::new();
    for checksum in checksums {
        let kind = checksum.kind();
        let digest = match computed.iter().find(|(k, _)| *k == kind) {
            Some((_, d)) => d.clone(),
            None => {
                let d = digest_path(path, kind)?;
                computed.push((kind, d.clone()));
                d
            }
        };
        if digest == checksum.hex() {
            return Ok(true);
        }
    }
    Ok(false)
}
