//! Per-source failure recorded in a package's error list.

/// Why a source could not be cached. Its `Display` is the failure string
/// stored in the run's error map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Every URL (primary and mirrors) failed to download or to validate.
    #[error("{label}: no valid source found ({})", .attempts.join("; "))]
    Unavailable { label: String, attempts: Vec<String> },
    /// The artifact validated but could not be written into the cache.
    #[error("{label}: cache write failed: {message}")]
    Storage { label: String, message: String },
}

impl SourceError {
    pub(crate) fn storage(label: &str, err: &anyhow::Error) -> Self {
        SourceError::Storage {
            label: label.to_string(),
            message: format!("{:#}", err),
        }
    }
}
