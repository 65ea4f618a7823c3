//! Last path segment of a URL.

use percent_encoding::percent_decode_str;
use url::Url;

/// Returns the percent-decoded last non-empty path segment of `url`.
///
/// Trailing slashes are ignored (`/a/b/` → `b`). Returns `None` for a root or
/// empty path and for the `.`/`..` segments.
pub fn filename_from_url_path(url: &Url) -> Option<String> {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last()?;
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    if decoded.is_empty() || decoded == "." || decoded == ".." {
        return None;
    }
    Some(decoded.into_owned())
}
