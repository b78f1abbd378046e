//! Archive checksums and their content addresses.
//!
//! A source declares an ordered list of checksums. The first one is
//! authoritative: it alone decides where the artifact is stored in the cache
//! (see [`content_path`]). The rest are alternate verification values, so a
//! download is accepted when it matches any of them.

mod address;
mod digest;

use std::fmt;
use std::str::FromStr;

pub use address::content_path;
pub use digest::{digest_path, matches_any, verify_file};

/// Hash algorithm of a checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashKind {
    Md5,
    Sha256,
    Sha512,
}

impl HashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HashKind::Md5 => "md5",
            HashKind::Sha256 => "sha256",
            HashKind::Sha512 => "sha512",
        }
    }

    /// Length of the hex-encoded digest.
    pub fn hex_len(self) -> usize {
        match self {
            HashKind::Md5 => 32,
            HashKind::Sha256 => 64,
            HashKind::Sha512 => 128,
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashKind {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(HashKind::Md5),
            "sha256" => Ok(HashKind::Sha256),
            "sha512" => Ok(HashKind::Sha512),
            other => Err(ChecksumError::UnknownKind(other.to_string())),
        }
    }
}

/// Error parsing a checksum string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChecksumError {
    #[error("unknown checksum kind '{0}'")]
    UnknownKind(String),
    #[error("checksum '{0}' is not valid hex")]
    BadHex(String),
    #[error("{kind} checksum must be {expected} hex characters, got {actual}")]
    BadLength {
        kind: HashKind,
        expected: usize,
        actual: usize,
    },
}

/// A single `(algorithm, hex digest)` pair. The digest is kept lowercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checksum {
    kind: HashKind,
    hex: String,
}

impl Checksum {
    pub fn new(kind: HashKind, hex: &str) -> Result<Self, ChecksumError> {
        let hex = hex.trim().to_ascii_lowercase();
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ChecksumError::BadHex(hex));
        }
        if hex.len() != kind.hex_len() {
            return Err(ChecksumError::BadLength {
                kind,
                expected: kind.hex_len(),
                actual: hex.len(),
            });
        }
        Ok(Self { kind, hex })
    }

    pub fn kind(&self) -> HashKind {
        self.kind
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind, self.hex)
    }
}

impl FromStr for Checksum {
    type Err = ChecksumError;

    /// Parses `kind=hex`. A bare 32-character hex string is read as md5, the
    /// form older definitions use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('=') {
            Some((kind, hex)) => Checksum::new(kind.parse()?, hex),
            None => Checksum::new(HashKind::Md5, s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn parse_kind_and_hex() {
        let c: Checksum = format!("sha256={}", SHA256_EMPTY).parse().unwrap();
        assert_eq!(c.kind(), HashKind::Sha256);
        assert_eq!(c.hex(), SHA256_EMPTY);
        assert_eq!(c.to_string(), format!("sha256={}", SHA256_EMPTY));
    }

    #[test]
    fn parse_normalizes_case() {
        let c: Checksum = "MD5=D41D8CD98F00B204E9800998ECF8427E".parse().unwrap();
        assert_eq!(c.kind(), HashKind::Md5);
        assert_eq!(c.hex(), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn bare_hex_is_md5() {
        let c: Checksum = "d41d8cd98f00b204e9800998ecf8427e".parse().unwrap();
        assert_eq!(c.kind(), HashKind::Md5);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "crc32=deadbeef".parse::<Checksum>().unwrap_err();
        assert_eq!(err, ChecksumError::UnknownKind("crc32".to_string()));
    }

    #[test]
    fn rejects_wrong_length() {
        let err = "sha256=deadbeef".parse::<Checksum>().unwrap_err();
        assert!(matches!(
            err,
            ChecksumError::BadLength {
                kind: HashKind::Sha256,
                expected: 64,
                actual: 8
            }
        ));
    }

    #[test]
    fn rejects_non_hex() {
        let err = format!("md5={}", "z".repeat(32)).parse::<Checksum>().unwrap_err();
        assert!(matches!(err, ChecksumError::BadHex(_)));
    }
}
