//! CLI command handlers.

mod cache;
mod checksum;
mod generate;

pub use cache::run_cache;
pub use checksum::run_checksum;
pub use generate::{run_completions, run_man};
