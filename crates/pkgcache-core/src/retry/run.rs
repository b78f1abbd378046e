//! Blocking retry loop around one transfer.

use super::error::TransferError;
use super::policy::{RetryDecision, RetryPolicy};

/// Calls `f` until it succeeds or `policy` gives up, sleeping between
/// attempts. Call from a blocking thread.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, TransferError>
where
    F: FnMut() -> Result<T, TransferError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = e.kind();
                match policy.decide(attempt, kind) {
                    RetryDecision::GiveUp => return Err(e),
                    RetryDecision::RetryAfter(d) => {
                        tracing::debug!(attempt, ?kind, "transfer failed ({}), retrying in {:?}", e, d);
                        std::thread::sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}
