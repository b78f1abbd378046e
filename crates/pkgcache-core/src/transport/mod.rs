//! Transport: fetch one URL into a local file.
//!
//! The cache core only depends on the [`Transport`] trait; mirror fallback and
//! checksum validation happen above it.

mod libcurl;

use async_trait::async_trait;
use std::path::Path;

use crate::retry::TransferError;

pub use libcurl::CurlTransport;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Download `url` into `dest` (created or truncated). Returns the number
    /// of bytes written.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, TransferError>;
}
