//! Error type for resolving and downloading a single resource.

use std::path::PathBuf;
use thiserror::Error;

/// Fieldless discriminant of [`FetchError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    UnsupportedScheme,
    MissingDestination,
    TooManyRedirects,
    UnexpectedStatus,
    Io,
    Transport,
}

/// Failure of a fetch. Every variant is terminal: nothing is retried and no
/// partially written file is ever reported as a result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The resource is neither an existing local file nor a well-formed URL.
    #[error("cannot parse resource {resource:?}")]
    Parse {
        resource: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unknown URL scheme: {scheme}")]
    UnsupportedScheme { scheme: String },

    /// HTTP fetch requested without a destination file or directory.
    #[error("destination must be either a file or directory path")]
    MissingDestination,

    #[error("stopped after {limit} redirects fetching {url}")]
    TooManyRedirects { limit: u32, url: String },

    /// Anything other than exactly 200 OK, including other 2xx codes.
    #[error("expected 200 instead got {status} at {url}")]
    UnexpectedStatus { status: u32, url: String },

    /// Temp file creation, body write, or final rename failed.
    #[error("I/O error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client failed (connect, DNS, TLS, truncated body, ...).
    #[error("GET {url} failed")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Parse { .. } => ErrorKind::Parse,
            FetchError::UnsupportedScheme { .. } => ErrorKind::UnsupportedScheme,
            FetchError::MissingDestination => ErrorKind::MissingDestination,
            FetchError::TooManyRedirects { .. } => ErrorKind::TooManyRedirects,
            FetchError::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            FetchError::Io { .. } => ErrorKind::Io,
            FetchError::Transport { .. } => ErrorKind::Transport,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn transport(url: &url::Url, source: curl::Error) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            source,
        }
    }
}
