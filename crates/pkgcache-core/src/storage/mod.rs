//! Cache tree writes.
//!
//! Downloads land in a uniquely named `.part` file under `<cache>/.staging`
//! and are renamed into their content address only after validation. The
//! staging dir sits inside the cache root so the rename never crosses a
//! filesystem, which keeps concurrent writers of the same address from ever
//! exposing a partial file.

mod staged;

pub use staged::StagedFile;

/// Name of the staging directory inside the cache root.
pub const STAGING_DIR: &str = ".staging";

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";
