//! Progress reporting for a single download (bytes done, rate, ETA).
//!
//! The downloader drives a [`ProgressReporter`], which samples throughput on a
//! fixed interval and forwards snapshots to a [`ProgressSink`]. Rendering is up
//! to the sink.

use std::time::{Duration, Instant};

/// Default interval between progress samples.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Snapshot of download progress.
#[derive(Debug, Clone)]
pub struct ProgressStats {
    /// Bytes written to the temp file so far.
    pub bytes_done: u64,
    /// Declared `Content-Length` of the response, if any.
    pub total_bytes: Option<u64>,
    /// Elapsed time since the body started arriving (seconds).
    pub elapsed_secs: f64,
}

impl ProgressStats {
    /// Download rate in bytes per second (0 if elapsed is 0).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }

    /// Estimated seconds remaining (None if the total is unknown or rate is 0).
    pub fn eta_secs(&self) -> Option<f64> {
        let total = self.total_bytes?;
        let remaining = total.saturating_sub(self.bytes_done);
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.bytes_per_sec();
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }

    /// Fraction complete in [0.0, 1.0], or None when the total is unknown.
    pub fn fraction(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(1.0),
            Some(total) => Some((self.bytes_done as f64 / total as f64).min(1.0)),
            None => None,
        }
    }
}

/// Receiver of progress updates (a progress bar, a log line, ...).
pub trait ProgressSink {
    /// Called once before the first byte is written.
    fn start(&mut self, total_bytes: Option<u64>);
    /// Called at most once per sampling interval while bytes arrive.
    fn update(&mut self, stats: &ProgressStats);
    /// Called once after the copy ends, successfully or not.
    fn finish(&mut self, stats: &ProgressStats);
}

/// Sink that reports through `tracing`. Used when the caller supplies none.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn start(&mut self, total_bytes: Option<u64>) {
        tracing::info!(total_bytes, "download started");
    }

    fn update(&mut self, stats: &ProgressStats) {
        tracing::info!(
            bytes_done = stats.bytes_done,
            total_bytes = stats.total_bytes,
            bytes_per_sec = stats.bytes_per_sec() as u64,
            "downloading"
        );
    }

    fn finish(&mut self, stats: &ProgressStats) {
        tracing::info!(
            bytes_done = stats.bytes_done,
            elapsed_secs = stats.elapsed_secs,
            "download finished"
        );
    }
}

/// Counts bytes as they are copied and samples them into a sink.
pub struct ProgressReporter<'a> {
    sink: &'a mut dyn ProgressSink,
    total_bytes: Option<u64>,
    bytes_done: u64,
    started: Instant,
    last_sample: Instant,
    interval: Duration,
}

impl<'a> ProgressReporter<'a> {
    /// Seeds the reporter with the declared size and starts the sink.
    pub fn start(
        sink: &'a mut dyn ProgressSink,
        total_bytes: Option<u64>,
        interval: Duration,
    ) -> Self {
        sink.start(total_bytes);
        let now = Instant::now();
        Self {
            sink,
            total_bytes,
            bytes_done: 0,
            started: now,
            last_sample: now,
            interval,
        }
    }

    pub fn advance(&mut self, bytes: u64) {
        self.bytes_done += bytes;
        if self.last_sample.elapsed() >= self.interval {
            let stats = self.stats();
            self.sink.update(&stats);
            self.last_sample = Instant::now();
        }
    }

    pub fn stats(&self) -> ProgressStats {
        ProgressStats {
            bytes_done: self.bytes_done,
            total_bytes: self.total_bytes,
            elapsed_secs: self.started.elapsed().as_secs_f64(),
        }
    }

    pub fn finish(self) {
        let stats = self.stats();
        self.sink.finish(&stats);
    }
}
