//! Fetch entry point: resolve a resource identifier, download if needed.

use std::path::PathBuf;

use crate::downloader::{DownloadOptions, Downloader};
use crate::error::FetchError;
use crate::progress::{LogProgress, ProgressSink};
use crate::resolver::{self, ResolvedSource};

/// Input to a single fetch.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Local path, `file://` URL or `http(s)://` URL.
    pub resource: String,
    /// File path or existing directory. Only required for HTTP resources.
    pub destination: Option<PathBuf>,
    pub show_progress: bool,
}

impl FetchRequest {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            destination: None,
            show_progress: false,
        }
    }

    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn download_options(&self) -> DownloadOptions {
        DownloadOptions {
            destination: self.destination.clone(),
            show_progress: self.show_progress,
        }
    }
}

/// Fetches with a default [`Downloader`], logging progress via `tracing`.
pub fn fetch(request: &FetchRequest) -> Result<PathBuf, FetchError> {
    fetch_with(&Downloader::default(), request, &mut LogProgress)
}

/// Resolves `request.resource` and returns a path to a file on local storage.
///
/// Local files and `file:` URLs return immediately without a destination;
/// HTTP resources are downloaded by `downloader`.
pub fn fetch_with(
    downloader: &Downloader,
    request: &FetchRequest,
    progress: &mut dyn ProgressSink,
) -> Result<PathBuf, FetchError> {
    match resolver::resolve(&request.resource)? {
        ResolvedSource::LocalPath(path) | ResolvedSource::RemoteFile(path) => Ok(path),
        ResolvedSource::RemoteHttp(url) => {
            downloader.download_reporting(&url, &request.download_options(), progress)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn local_file_needs_no_destination() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let p = f.path().to_str().unwrap();
        assert_eq!(fetch(&FetchRequest::new(p)).unwrap(), f.path());
    }

    #[test]
    fn file_url_needs_no_destination() {
        let out = fetch(&FetchRequest::new("file:///opt/registry.json")).unwrap();
        assert_eq!(out, PathBuf::from("/opt/registry.json"));
    }

    #[test]
    fn http_without_destination_is_rejected() {
        let err = fetch(&FetchRequest::new("http://192.0.2.1/x.exe")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingDestination);
    }

    #[test]
    fn unsupported_scheme_has_no_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let req = FetchRequest::new("ftp://example.com/x.exe").destination(dir.path());
        let err = fetch(&req).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedScheme);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
