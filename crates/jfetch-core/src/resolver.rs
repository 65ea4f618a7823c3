//! Resource identifier classification.
//!
//! An identifier is checked against local storage first; only when it does not
//! name an existing file is it parsed as a URL and dispatched on its scheme.

use percent_encoding::percent_decode_str;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::FetchError;

/// Outcome of classifying a resource identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSource {
    /// The identifier already names an existing local file.
    LocalPath(PathBuf),
    /// Path component of a `file:` URL. Not checked for existence.
    RemoteFile(PathBuf),
    /// An `http` or `https` URL that must be downloaded.
    RemoteHttp(Url),
}

impl ResolvedSource {
    /// Short label used in logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            ResolvedSource::LocalPath(_) => "local",
            ResolvedSource::RemoteFile(_) => "file",
            ResolvedSource::RemoteHttp(_) => "http",
        }
    }
}

impl fmt::Display for ResolvedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedSource::LocalPath(p) | ResolvedSource::RemoteFile(p) => {
                write!(f, "{}\t{}", self.label(), p.display())
            }
            ResolvedSource::RemoteHttp(u) => write!(f, "{}\t{}", self.label(), u),
        }
    }
}

/// Classifies `resource` without touching the network.
pub fn resolve(resource: &str) -> Result<ResolvedSource, FetchError> {
    if Path::new(resource).is_file() {
        tracing::debug!(resource, "resource is an existing local file");
        return Ok(ResolvedSource::LocalPath(PathBuf::from(resource)));
    }

    let url = Url::parse(resource).map_err(|source| FetchError::Parse {
        resource: resource.to_string(),
        source,
    })?;

    match url.scheme() {
        "file" => {
            let path = percent_decode_str(url.path()).decode_utf8_lossy();
            Ok(ResolvedSource::RemoteFile(PathBuf::from(path.as_ref())))
        }
        "http" | "https" => Ok(ResolvedSource::RemoteHttp(url)),
        other => Err(FetchError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}
