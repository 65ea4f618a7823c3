//! Response-head tracking across a redirect chain.
//!
//! libcurl follows redirects itself and hands every response's header lines to
//! the header callback. The tracker reads them to learn the final status, the
//! declared body size and the last redirect target, and to stop the chain once
//! it reaches the configured limit.

use std::str;
use url::Url;

#[derive(Debug)]
pub(crate) struct RedirectTracker {
    /// URL of the request whose response is currently being read.
    current: Url,
    last_location: Option<Url>,
    redirects: u32,
    limit: u32,
    exceeded: bool,
    /// The head just read belongs to the response whose body is kept.
    final_head: bool,
    status: Option<u32>,
    content_length: Option<u64>,
    location: Option<String>,
}

impl RedirectTracker {
    pub(crate) fn new(request: Url, limit: u32) -> Self {
        Self {
            current: request,
            last_location: None,
            redirects: 0,
            limit,
            exceeded: false,
            final_head: false,
            status: None,
            content_length: None,
            location: None,
        }
    }

    /// Feeds one raw header line. Returns false to abort the transfer.
    pub(crate) fn observe(&mut self, raw: &[u8]) -> bool {
        let line = match str::from_utf8(raw) {
            Ok(s) => s.trim_end(),
            Err(_) => return true,
        };

        if line.starts_with("HTTP/") {
            self.status = parse_status_line(line);
            self.final_head = false;
            self.content_length = None;
            self.location = None;
            return true;
        }

        if line.is_empty() {
            return self.end_of_head();
        }

        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                self.content_length = value.parse::<u64>().ok();
            } else if name.eq_ignore_ascii_case("location") {
                self.location = Some(value.to_string());
            }
        }
        true
    }

    /// A response head is complete; if it is a redirect, record its target.
    fn end_of_head(&mut self) -> bool {
        let status = match self.status {
            Some(status) => status,
            None => return true,
        };
        let location = match (is_redirect_status(status), self.location.take()) {
            (true, Some(loc)) => loc,
            _ => {
                // 1xx heads are followed by the real response.
                self.final_head = status >= 200;
                return true;
            }
        };

        self.redirects += 1;
        if self.redirects >= self.limit {
            tracing::debug!(limit = self.limit, "redirect limit reached");
            self.exceeded = true;
            return false;
        }

        match self.current.join(&location) {
            Ok(next) => {
                tracing::debug!(from = %self.current, to = %next, "following redirect");
                self.current = next.clone();
                self.last_location = Some(next);
            }
            Err(e) => tracing::warn!(location = %location, "unparseable redirect target: {}", e),
        }
        true
    }

    pub(crate) fn status(&self) -> Option<u32> {
        self.status
    }

    /// True once the head of the response that carries the body has ended.
    pub(crate) fn is_final(&self) -> bool {
        self.final_head
    }

    pub(crate) fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Target of the most recent redirect, or None when the first response was final.
    pub(crate) fn last_location(&self) -> Option<&Url> {
        self.last_location.as_ref()
    }

    pub(crate) fn exceeded(&self) -> bool {
        self.exceeded
    }

    pub(crate) fn limit(&self) -> u32 {
        self.limit
    }
}

fn is_redirect_status(code: u32) -> bool {
    matches!(code, 300 | 301 | 302 | 303 | 307 | 308)
}

/// `HTTP/1.1 302 Found` or `HTTP/2 200` → status code.
fn parse_status_line(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(t: &mut RedirectTracker, lines: &[&str]) -> bool {
        lines
            .iter()
            .all(|l| t.observe(format!("{}\r\n", l).as_bytes()))
    }

    #[test]
    fn plain_200_has_no_last_location() {
        let mut t = RedirectTracker::new(Url::parse("http://a/x.exe").unwrap(), 10);
        assert!(feed(&mut t, &["HTTP/1.1 200 OK", "Content-Length: 42", ""]));
        assert_eq!(t.status(), Some(200));
        assert_eq!(t.content_length(), Some(42));
        assert!(t.last_location().is_none());
        assert!(t.is_final());
    }

    #[test]
    fn absolute_redirect_is_recorded() {
        let mut t = RedirectTracker::new(Url::parse("http://a/x.exe").unwrap(), 10);
        assert!(feed(
            &mut t,
            &[
                "HTTP/1.1 302 Found",
                "Location: http://b/y.exe",
                "Content-Length: 0",
                "",
                "HTTP/1.1 200 OK",
                "Content-Length: 7",
                "",
            ]
        ));
        assert_eq!(t.status(), Some(200));
        assert_eq!(t.content_length(), Some(7));
        assert_eq!(t.last_location().unwrap().as_str(), "http://b/y.exe");
    }

    #[test]
    fn relative_redirect_resolves_against_current_url() {
        let mut t = RedirectTracker::new(Url::parse("http://a/dl/x.exe").unwrap(), 10);
        assert!(feed(
            &mut t,
            &["HTTP/1.1 301 Moved", "location: ../mirror/y.exe", ""]
        ));
        assert!(feed(&mut t, &["HTTP/1.1 307 Temporary", "Location: z.exe", ""]));
        assert_eq!(t.last_location().unwrap().as_str(), "http://a/mirror/z.exe");
    }

    #[test]
    fn multiple_choices_is_followed() {
        let mut t = RedirectTracker::new(Url::parse("http://a/x.exe").unwrap(), 10);
        assert!(feed(
            &mut t,
            &["HTTP/1.1 300 Multiple Choices", "Location: /mirror/x.exe", ""]
        ));
        assert!(!t.is_final());
        assert!(feed(&mut t, &["HTTP/1.1 200 OK", ""]));
        assert_eq!(t.last_location().unwrap().as_str(), "http://a/mirror/x.exe");
        assert!(t.is_final());
    }

    #[test]
    fn interim_head_is_not_final() {
        let mut t = RedirectTracker::new(Url::parse("http://a/x").unwrap(), 10);
        assert!(feed(&mut t, &["HTTP/1.1 100 Continue", ""]));
        assert!(!t.is_final());
        assert!(feed(&mut t, &["HTTP/1.1 200 OK", ""]));
        assert!(t.is_final());
    }

    #[test]
    fn non_redirect_location_is_ignored() {
        let mut t = RedirectTracker::new(Url::parse("http://a/x").unwrap(), 10);
        assert!(feed(&mut t, &["HTTP/1.1 201 Created", "Location: /y", ""]));
        assert!(t.last_location().is_none());
        assert_eq!(t.status(), Some(201));
    }

    #[test]
    fn aborts_when_limit_reached() {
        let mut t = RedirectTracker::new(Url::parse("http://a/0").unwrap(), 3);
        assert!(feed(&mut t, &["HTTP/1.1 302 Found", "Location: /1", ""]));
        assert!(feed(&mut t, &["HTTP/1.1 302 Found", "Location: /2", ""]));
        assert!(!feed(&mut t, &["HTTP/1.1 302 Found", "Location: /3", ""]));
        assert!(t.exceeded());
        assert_eq!(t.last_location().unwrap().as_str(), "http://a/2");
    }

    #[test]
    fn http2_status_line() {
        assert_eq!(parse_status_line("HTTP/2 404"), Some(404));
        assert_eq!(parse_status_line("HTTP/1.1 206 Partial Content"), Some(206));
        assert_eq!(parse_status_line("HTTP/1.1"), None);
    }
}
