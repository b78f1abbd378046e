//! Batch scheduler.
//!
//! Runs the per-package cache task for every package of a repository with at
//! most `jobs` tasks in flight. Packages are started in hash-scrambled order
//! so neighbouring packages (often from the same upstream host) are not
//! fetched at the same time. Per-package results fold into a [`RunSummary`].

mod order;
mod parallel;
mod report;
mod run;

pub use order::{scramble_key, scramble_order};
pub use parallel::reduce;
pub use report::{merge_errors, ErrorMap, RunSummary};
pub use run::{populate_cache, CacheOptions};
