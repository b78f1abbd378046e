//! Transfer errors and their retry classification.

/// Error returned by a single URL transfer.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// libcurl failure (timeout, connection, unsupported scheme, missing file).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Non-2xx HTTP status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the staged file failed.
    #[error("write: {0}")]
    Io(#[from] std::io::Error),
}

/// How a failed transfer should be treated by [`RetryPolicy`](super::RetryPolicy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    /// 429 or 503.
    Throttled,
    Connection,
    ServerError(u32),
    /// Not worth retrying on the same URL (4xx, bad URL, local I/O).
    Permanent,
}

impl ErrorKind {
    pub fn is_transient(self) -> bool {
        !matches!(self, ErrorKind::Permanent)
    }
}

impl TransferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransferError::Curl(e) => curl_kind(e),
            TransferError::Http(code) => http_kind(*code),
            TransferError::Io(_) => ErrorKind::Permanent,
        }
    }
}

fn http_kind(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::ServerError(code),
        _ => ErrorKind::Permanent,
    }
}

fn curl_kind(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        ErrorKind::Timeout
    } else if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        ErrorKind::Connection
    } else {
        ErrorKind::Permanent
    }
}
