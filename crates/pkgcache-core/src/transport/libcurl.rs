//! libcurl transport (http, https, ftp, file).
//!
//! Each transfer is a single sequential GET run on a blocking thread, retried
//! per [`RetryPolicy`] on transient errors.

use async_trait::async_trait;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::TransferConfig;
use crate::retry::{run_with_retry, RetryPolicy, TransferError};

use super::Transport;

/// [`Transport`] backed by the `curl` crate.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    limits: TransferConfig,
    retry: RetryPolicy,
}

impl CurlTransport {
    pub fn new(limits: TransferConfig, retry: RetryPolicy) -> Self {
        Self { limits, retry }
    }
}

#[async_trait]
impl Transport for CurlTransport {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, TransferError> {
        let url = url.to_string();
        let dest = dest.to_path_buf();
        let limits = self.limits.clone();
        let retry = self.retry;
        tokio::task::spawn_blocking(move || {
            run_with_retry(&retry, || download_to_file(&url, &dest, &limits))
        })
        .await
        .map_err(|e| TransferError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
    }
}

/// One GET of `url` into `dest`, truncating it first so a retry starts clean.
fn download_to_file(url: &str, dest: &Path, limits: &TransferConfig) -> Result<u64, TransferError> {
    let mut file = File::create(dest)?;
    let mut written = 0u64;
    let mut write_error: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(limits.connect_timeout())?;
    easy.low_speed_limit(limits.low_speed_limit)?;
    easy.low_speed_time(limits.low_speed_time())?;
    easy.timeout(limits.timeout())?;

    let res = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                tracing::warn!("write to {} failed: {}", dest.display(), e);
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };
    if let Some(e) = write_error {
        return Err(TransferError::Io(e));
    }
    res?;

    // file:// and ftp report 0 on success.
    let code = easy.response_code()?;
    if code != 0 && !(200..300).contains(&code) {
        return Err(TransferError::Http(code));
    }
    file.flush()?;
    Ok(written)
}
