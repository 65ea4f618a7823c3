//! Terminal progress line for `jfetch get`.

use jfetch_core::progress::{ProgressSink, ProgressStats};
use std::io::Write;

const MIB: f64 = 1_048_576.0;

/// Prints `done / total MiB (pct%)  rate MiB/s  ETA` to stderr, rewriting the
/// same line on each sample.
#[derive(Debug, Default)]
pub struct TerminalProgress {
    active: bool,
}

pub(crate) fn render(stats: &ProgressStats) -> String {
    let done_mib = stats.bytes_done as f64 / MIB;
    let rate_mib = stats.bytes_per_sec() / MIB;
    let eta = stats
        .eta_secs()
        .map(|s| format!("{:.0}s", s))
        .unwrap_or_else(|| "?".to_string());
    match (stats.total_bytes, stats.fraction()) {
        (Some(total), Some(fraction)) => format!(
            "  {:.1} / {:.1} MiB ({:.1}%)  {:.2} MiB/s  ETA {}  ",
            done_mib,
            total as f64 / MIB,
            fraction * 100.0,
            rate_mib,
            eta
        ),
        _ => format!("  {:.1} MiB  {:.2} MiB/s  ", done_mib, rate_mib),
    }
}

impl ProgressSink for TerminalProgress {
    fn start(&mut self, total_bytes: Option<u64>) {
        self.active = true;
        match total_bytes {
            Some(n) => eprintln!("downloading {:.1} MiB", n as f64 / MIB),
            None => eprintln!("downloading (size unknown)"),
        }
    }

    fn update(&mut self, stats: &ProgressStats) {
        let mut err = std::io::stderr().lock();
        let _ = write!(err, "\r{}", render(stats));
        let _ = err.flush();
    }

    fn finish(&mut self, stats: &ProgressStats) {
        if self.active {
            eprintln!("\r{}", render(stats));
            self.active = false;
        }
    }
}
