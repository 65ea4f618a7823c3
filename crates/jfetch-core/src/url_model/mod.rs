//! File names derived from URL paths.
//!
//! The base name of a URL path becomes the file name when a download lands in
//! a directory. Names are percent-decoded and sanitized so they cannot escape
//! the target directory.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

use url::Url;

/// Used when the URL path has no usable last segment (e.g. `https://example.com/`).
pub const DEFAULT_FILENAME: &str = "download.bin";

/// Derives the on-disk file name for `url`.
///
/// - `https://example.com/setup/x.exe` → `"x.exe"`
/// - `https://example.com/my%20tool.zip` → `"my tool.zip"`
/// - `https://example.com/` → `"download.bin"`
pub fn file_name_for(url: &Url) -> String {
    let raw = match filename_from_url_path(url) {
        Some(raw) => raw,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}
