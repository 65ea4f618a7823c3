//! Single-stream HTTP GET downloader with atomic publish.
//!
//! One GET per call (libcurl, redirects followed up to a cap). The final path
//! is computed from the destination and the last redirect target, the body is
//! streamed to `<final>.download` and renamed into place once complete. An
//! existing file at the final path is returned as-is.

mod body;
mod redirect;

use std::cell::RefCell;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::destination::Destination;
use crate::error::FetchError;
use crate::progress::{self, LogProgress, ProgressSink};
use body::{BodyPlan, BodySink};
use redirect::RedirectTracker;

/// Default cap on the redirect chain.
pub const DEFAULT_MAX_REDIRECTS: u32 = 10;

/// Per-call HTTP client configuration. A fresh curl handle is built from it
/// for every download; no client state outlives a call.
#[derive(Debug, Clone, Copy)]
pub struct ClientConfig {
    /// The transfer aborts when the redirect chain reaches this many hops.
    pub max_redirects: u32,
    /// None = libcurl's default.
    pub connect_timeout: Option<Duration>,
    /// Interval between progress samples.
    pub progress_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            connect_timeout: None,
            progress_interval: progress::DEFAULT_INTERVAL,
        }
    }
}

impl ClientConfig {
    fn easy(&self, url: &Url) -> Result<curl::easy::Easy, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.get(true)?;
        easy.follow_location(true)?;
        // The tracker stops the chain first; this is libcurl's own bound.
        easy.max_redirections(self.max_redirects)?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }
        Ok(easy)
    }
}

/// Options for a single download.
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// A file path, or an existing directory that receives a file named after
    /// the URL. Required.
    pub destination: Option<PathBuf>,
    pub show_progress: bool,
}

impl DownloadOptions {
    pub fn to(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: Some(destination.into()),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Downloader {
    client: ClientConfig,
}

impl Downloader {
    pub fn new(client: ClientConfig) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ClientConfig {
        &self.client
    }

    /// Downloads `url`, reporting progress through `tracing` when enabled.
    pub fn download(&self, url: &Url, options: &DownloadOptions) -> Result<PathBuf, FetchError> {
        let mut sink = LogProgress;
        self.download_reporting(url, options, &mut sink)
    }

    /// Downloads `url`, reporting progress to `progress` when
    /// `options.show_progress` is set. Returns the final path, which holds a
    /// complete file on success.
    pub fn download_reporting(
        &self,
        url: &Url,
        options: &DownloadOptions,
        progress: &mut dyn ProgressSink,
    ) -> Result<PathBuf, FetchError> {
        let destination = Destination::from_option(options.destination.as_deref())?;
        tracing::debug!(url = %url, ?destination, "GET");

        let interval = self.client.progress_interval;
        let tracker = RefCell::new(RedirectTracker::new(url.clone(), self.client.max_redirects));
        let mut progress = options.show_progress.then_some(progress);
        let sink: RefCell<Option<BodySink<'_, _>>> = RefCell::new(None);

        let mut easy = self
            .client
            .easy(url)
            .map_err(|e| FetchError::transport(url, e))?;
        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|line| {
                    let mut head = tracker.borrow_mut();
                    if !head.observe(line) {
                        return false;
                    }
                    if !head.is_final() || sink.borrow().is_some() {
                        return true;
                    }
                    // Final head: decide before any body byte arrives and stop
                    // the transfer when the body is not needed.
                    let plan = BodyPlan::decide(url, &head, &destination);
                    let opened = BodySink::open(plan, head.content_length(), progress.take(), interval);
                    let proceed = opened.wants_body();
                    *sink.borrow_mut() = Some(opened);
                    proceed
                })
                .map_err(|e| FetchError::transport(url, e))?;
            transfer
                .write_function(|data| Ok(sink.borrow_mut().as_mut().map_or(0, |s| s.write(data))))
                .map_err(|e| FetchError::transport(url, e))?;
            transfer.perform()
        };
        drop(easy);

        let head = tracker.into_inner();
        let outcome = transfer_outcome(url, &head, performed);
        match sink.into_inner() {
            Some(sink) => sink.finish(outcome),
            None => {
                // No final head was seen: the redirect cap or a transport failure.
                outcome?;
                let plan = BodyPlan::decide(url, &head, &destination);
                BodySink::open(plan, head.content_length(), progress.take(), interval).finish(Ok(()))
            }
        }
    }
}

/// Maps the transfer result, giving the redirect cap precedence over the
/// write error libcurl reports when the header callback aborts.
fn transfer_outcome(
    url: &Url,
    head: &RedirectTracker,
    performed: Result<(), curl::Error>,
) -> Result<(), FetchError> {
    if head.exceeded() {
        return Err(FetchError::TooManyRedirects {
            limit: head.limit(),
            url: url.to_string(),
        });
    }
    match performed {
        Ok(()) => Ok(()),
        Err(e) if e.is_too_many_redirects() => Err(FetchError::TooManyRedirects {
            limit: head.limit(),
            url: url.to_string(),
        }),
        Err(e) => Err(FetchError::transport(url, e)),
    }
}
