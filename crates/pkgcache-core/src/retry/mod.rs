//! Retry and backoff for single URL transfers.
//!
//! Transient failures (timeouts, throttling, connection errors, 5xx) are
//! retried against the same URL with exponential backoff. Anything else ends
//! the attempt so the caller can move on to the next mirror.

mod error;
mod policy;
mod run;

pub use error::{ErrorKind, TransferError};
pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
