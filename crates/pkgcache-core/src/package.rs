//! Package identity: `name.version`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Unique key of a package throughout a cache run.
///
/// Ordered by name, then by version using Debian-style comparison (`~` sorts
/// before anything, digit runs compare numerically).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId {
    pub name: String,
    pub version: String,
}

impl PackageId {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.version)
    }
}

/// Error parsing `name.version`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not of the form name.version")]
pub struct InvalidPackageId(pub String);

impl FromStr for PackageId {
    type Err = InvalidPackageId;

    /// Names never contain a dot, so everything after the first one is the version.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((name, version)) if !name.is_empty() && !version.is_empty() => {
                Ok(PackageId::new(name, version))
            }
            _ => Err(InvalidPackageId(s.to_string())),
        }
    }
}

impl PartialOrd for PackageId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| compare_versions(&self.version, &other.version))
            .then_with(|| self.version.cmp(&other.version))
    }
}

fn char_weight(c: Option<char>) -> i32 {
    match c {
        Some('~') => -1,
        None => 0,
        Some(c) if c.is_ascii_alphabetic() => c as i32,
        Some(c) => c as i32 + 256,
    }
}

fn compare_non_digits(a: &str, b: &str) -> Ordering {
    let mut a = a.chars();
    let mut b = b.chars();
    loop {
        let (ca, cb) = (a.next(), b.next());
        if ca.is_none() && cb.is_none() {
            return Ordering::Equal;
        }
        match char_weight(ca).cmp(&char_weight(cb)) {
            Ordering::Equal => {}
            res => return res,
        }
    }
}

fn split_non_digits(s: &str) -> (&str, &str) {
    let at = s.find(|c: char| c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(at)
}

fn split_digits(s: &str) -> (&str, &str) {
    let at = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(at)
}

/// Compare two version strings by alternating non-digit and digit runs.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a, b);
    while !a.is_empty() || !b.is_empty() {
        let (a_text, a_rest) = split_non_digits(a);
        let (b_text, b_rest) = split_non_digits(b);
        match compare_non_digits(a_text, b_text) {
            Ordering::Equal => {}
            res => return res,
        }
        let (a_num, a_rest) = split_digits(a_rest);
        let (b_num, b_rest) = split_digits(b_rest);
        let a_num = a_num.trim_start_matches('0');
        let b_num = b_num.trim_start_matches('0');
        match a_num.len().cmp(&b_num.len()).then_with(|| a_num.cmp(b_num)) {
            Ordering::Equal => {}
            res => return res,
        }
        a = a_rest;
        b = b_rest;
    }
    Ordering::Equal
}
