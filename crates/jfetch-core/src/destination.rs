//! Where a download lands: a file path used verbatim, or an existing directory
//! that receives a file named after the (redirected) URL.

use std::path::{Path, PathBuf};
use url::Url;

use crate::error::FetchError;
use crate::url_model;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    FilePath(PathBuf),
    ExistingDirectory(PathBuf),
}

impl Destination {
    /// Classifies `path` once, up front. A path that is not an existing
    /// directory is treated as a file path, whether or not it exists yet.
    pub fn classify(path: &Path) -> Self {
        if path.is_dir() {
            Destination::ExistingDirectory(path.to_path_buf())
        } else {
            Destination::FilePath(path.to_path_buf())
        }
    }

    /// Like [`classify`](Self::classify), but an absent or empty path is a
    /// `MissingDestination` error.
    pub fn from_option(path: Option<&Path>) -> Result<Self, FetchError> {
        match path {
            Some(p) if !p.as_os_str().is_empty() => Ok(Self::classify(p)),
            _ => Err(FetchError::MissingDestination),
        }
    }

    /// Final on-disk path for a response to `request`.
    ///
    /// For a directory the file name comes from `last_location` when the
    /// request was redirected, never from the original request path.
    pub fn final_path(&self, request: &Url, last_location: Option<&Url>) -> PathBuf {
        match self {
            Destination::FilePath(path) => path.clone(),
            Destination::ExistingDirectory(dir) => {
                let named_by = last_location.unwrap_or(request);
                dir.join(url_model::file_name_for(named_by))
            }
        }
    }
}
