//! Per-run diagnostic record
//!
//! A [`BuildLog`] accumulates compiler diagnostics in memory during a run and
//! is written to disk once, at the logging checkpoint. The persisted form is
//! three lines (start, end, elapsed; decimal seconds) followed by the
//! diagnostics verbatim.

use crate::error::{BuildError, BuildResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Timing and diagnostics of one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLog {
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    diagnostics: String,
}

impl BuildLog {
    /// Start a log at `started_at`
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            diagnostics: String::new(),
        }
    }

    /// Append diagnostic text
    pub fn append_diagnostics(&mut self, text: &str) {
        self.diagnostics.push_str(text);
    }

    /// Close the log at `finished_at`
    ///
    /// An end before the start (clock stepped backwards) is clamped to the start.
    pub fn finish(&mut self, finished_at: DateTime<Utc>) {
        self.finished_at = Some(finished_at.max(self.started_at));
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn diagnostics(&self) -> &str {
        &self.diagnostics
    }

    /// Time between start and finish; zero while unfinished
    pub fn elapsed(&self) -> Duration {
        self.finished_at
            .and_then(|end| (end - self.started_at).to_std().ok())
            .unwrap_or(Duration::ZERO)
    }

    /// Persisted text form
    pub fn render(&self) -> String {
        let start = epoch_micros(self.started_at);
        let end = epoch_micros(self.finished_at.unwrap_or(self.started_at));

        let mut out = String::with_capacity(64 + self.diagnostics.len());
        out.push_str(&format_seconds(start));
        out.push('\n');
        out.push_str(&format_seconds(end));
        out.push('\n');
        out.push_str(&format_seconds(end - start));
        out.push('\n');
        out.push_str(&self.diagnostics);
        out
    }

    /// Write the log to `path`, replacing the previous run's log
    pub fn write_to(&self, path: &Path) -> BuildResult<()> {
        fs::write(path, self.render()).map_err(|e| BuildError::io(path, e))
    }
}

fn epoch_micros(at: DateTime<Utc>) -> i64 {
    at.timestamp_micros()
}

/// Microseconds as decimal seconds with six fractional digits
fn format_seconds(micros: i64) -> String {
    let sign = if micros < 0 { "-" } else { "" };
    let abs = micros.unsigned_abs();
    format!("{}{}.{:06}", sign, abs / 1_000_000, abs % 1_000_000)
}
