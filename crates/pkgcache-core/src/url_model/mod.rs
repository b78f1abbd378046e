//! File names derived from archive URLs, used for the link farm.

mod path;
mod sanitize;

pub use path::basename_from_url;
pub use sanitize::sanitize_file_name;

/// Safe link name for an archive URL: the sanitized last path segment, or
/// `None` when the URL yields nothing usable.
///
/// # Examples
///
/// - `link_name_for_url("https://example.org/foo-1.0.tar.gz")` → `Some("foo-1.0.tar.gz")`
/// - `link_name_for_url("https://example.org/")` → `None`
pub fn link_name_for_url(url: &str) -> Option<String> {
    let raw = basename_from_url(url)?;
    let sanitized = sanitize_file_name(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        None
    } else {
        Some(sanitized)
    }
}
