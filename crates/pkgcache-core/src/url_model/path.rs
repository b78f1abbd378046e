//! Last path segment of a URL.

/// Last non-empty path segment of `url` as it appears in the URL (not
/// percent-decoded), ignoring query and fragment. `None` if the URL cannot be
/// parsed or has no path.
pub fn basename_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
