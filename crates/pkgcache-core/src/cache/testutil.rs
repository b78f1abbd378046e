//! In-memory transport for tests.

use async_trait::async_trait;
use sha2::Digest;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::checksum::{Checksum, HashKind};
use crate::retry::TransferError;
use crate::transport::Transport;

pub(crate) fn checksum_of(kind: HashKind, data: &[u8]) -> Checksum {
    let hex = match kind {
        HashKind::Md5 => hex::encode(md5::Md5::digest(data)),
        HashKind::Sha256 => hex::encode(sha2::Sha256::digest(data)),
        HashKind::Sha512 => hex::encode(sha2::Sha512::digest(data)),
    };
    Checksum::new(kind, &hex).unwrap()
}

pub(crate) fn sha256_of(data: &[u8]) -> Checksum {
    checksum_of(HashKind::Sha256, data)
}

/// Serves registered URLs; anything else is a 404. Records every attempt and
/// the peak number of concurrent fetches.
#[derive(Default)]
pub(crate) struct MockTransport {
    bodies: Mutex<HashMap<String, Vec<u8>>>,
    attempts: Mutex<Vec<String>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every fetch sleeps for `delay` before answering.
    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub(crate) fn serve(&self, url: &str, body: &[u8]) {
        self.bodies
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_vec());
    }

    pub(crate) fn attempted_urls(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    pub(crate) fn total_attempts(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, TransferError> {
        self.attempts.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        let body = self.bodies.lock().unwrap().get(url).cloned();
        let res = match body {
            Some(body) => tokio::fs::write(dest, &body)
                .await
                .map(|()| body.len() as u64)
                .map_err(TransferError::from),
            None => Err(TransferError::Http(404)),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        res
    }
}
