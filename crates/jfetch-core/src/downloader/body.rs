//! Decides what happens to a response body and streams it to the temp file.

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use super::redirect::RedirectTracker;
use crate::destination::Destination;
use crate::error::FetchError;
use crate::progress::{ProgressReporter, ProgressSink};
use crate::staging::{StagingFile, StagingWriter};

/// What to do with the final response, decided once its head is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BodyPlan {
    /// Status was not 200; the body is discarded.
    Reject { status: u32, url: String },
    /// A file already sits at the final path; the body is discarded.
    AlreadyPresent(PathBuf),
    /// Stream the body to `<path>.download`, then rename onto `path`.
    Stage(PathBuf),
}

impl BodyPlan {
    pub(crate) fn decide(request: &Url, head: &RedirectTracker, destination: &Destination) -> Self {
        match head.status() {
            Some(200) => {}
            status => {
                return BodyPlan::Reject {
                    status: status.unwrap_or(0),
                    url: request.to_string(),
                }
            }
        }

        let final_path = destination.final_path(request, head.last_location());
        if final_path.is_file() {
            BodyPlan::AlreadyPresent(final_path)
        } else {
            BodyPlan::Stage(final_path)
        }
    }
}

enum SinkState<W: StagingWriter> {
    Discard,
    Staging(StagingFile<W>),
}

/// Receives body chunks from the transfer. A write error is kept here and
/// aborts the transfer; it takes precedence over the resulting curl error.
pub(crate) struct BodySink<'p, W: StagingWriter> {
    plan: BodyPlan,
    state: SinkState<W>,
    progress: Option<ProgressReporter<'p>>,
    error: Option<FetchError>,
}

impl<'p> BodySink<'p, std::io::BufWriter<std::fs::File>> {
    /// Opens the temp file when the plan calls for it.
    pub(crate) fn open(
        plan: BodyPlan,
        content_length: Option<u64>,
        progress: Option<&'p mut dyn ProgressSink>,
        interval: Duration,
    ) -> Self {
        let staged = match &plan {
            BodyPlan::Stage(final_path) => Some(StagingFile::create(final_path)),
            _ => None,
        };
        match staged {
            Some(Ok(staging)) => Self::with_staging(plan, staging, content_length, progress, interval),
            Some(Err(e)) => Self {
                plan,
                state: SinkState::Discard,
                progress: None,
                error: Some(e),
            },
            None => Self {
                plan,
                state: SinkState::Discard,
                progress: None,
                error: None,
            },
        }
    }
}

impl<'p, W: StagingWriter> BodySink<'p, W> {
    pub(crate) fn with_staging(
        plan: BodyPlan,
        staging: StagingFile<W>,
        content_length: Option<u64>,
        progress: Option<&'p mut dyn ProgressSink>,
        interval: Duration,
    ) -> Self {
        Self {
            plan,
            state: SinkState::Staging(staging),
            progress: progress.map(|sink| ProgressReporter::start(sink, content_length, interval)),
            error: None,
        }
    }

    /// False when the plan needs no body or the temp file could not be
    /// opened; the transfer is stopped as soon as the head is known.
    pub(crate) fn wants_body(&self) -> bool {
        self.error.is_none() && matches!(self.state, SinkState::Staging(_))
    }

    /// Accepts one chunk. Returns the number of bytes consumed; anything short
    /// of `data.len()` makes curl abort the transfer.
    pub(crate) fn write(&mut self, data: &[u8]) -> usize {
        if self.error.is_some() {
            return 0;
        }
        let staging = match &mut self.state {
            SinkState::Discard => return 0,
            SinkState::Staging(staging) => staging,
        };
        if let Err(e) = staging.write_chunk(data) {
            tracing::warn!("download write failed: {}", e);
            self.error = Some(e);
            return 0;
        }
        if let Some(p) = self.progress.as_mut() {
            p.advance(data.len() as u64);
        }
        data.len()
    }

    /// Ends the transfer. A rejected status or an already present file is
    /// reported as such whatever happened to the transfer; a staged body is
    /// published only when both the writes and the transfer succeeded.
    pub(crate) fn finish(mut self, transfer: Result<(), FetchError>) -> Result<PathBuf, FetchError> {
        if let Some(p) = self.progress.take() {
            p.finish();
        }

        let path = match self.plan {
            BodyPlan::Reject { status, url } => return Err(FetchError::UnexpectedStatus { status, url }),
            BodyPlan::AlreadyPresent(path) => {
                tracing::info!(path = %path.display(), "already downloaded");
                return Ok(path);
            }
            BodyPlan::Stage(path) => path,
        };
        if let Some(e) = self.error {
            return Err(e);
        }
        transfer?;

        match self.state {
            SinkState::Staging(staging) => {
                let published = staging.publish(&path)?;
                tracing::info!(path = %published.display(), "download complete");
                Ok(published)
            }
            SinkState::Discard => Err(FetchError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::Other, "temp file was never opened"),
            )),
        }
    }
}
