//! Periodic progress reporting while an index is loaded.
//!
//! Large indexes hold millions of records, so the loader reports through a
//! [`ProgressCallback`] it receives by reference. [`LoadProgress`] logs a short
//! status block at a fixed interval: elapsed time, the record being read, and
//! how many records and bytes were processed overall and since the last report.

use std::time::{Duration, Instant};

use crate::duplicates::human_size;

/// Progress callback for the load phase.
///
/// Implement this trait to receive updates while records are read.
pub trait ProgressCallback {
    /// Called once before the first record.
    ///
    /// # Arguments
    ///
    /// * `source` - Name of the index being read
    fn on_phase_start(&mut self, source: &str);

    /// Called for each record that was parsed.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the record
    /// * `bytes` - Size of the record in bytes
    fn on_progress(&mut self, path: &str, bytes: u64);

    /// Called after the last record.
    fn on_phase_end(&mut self) {}
}

/// Callback that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_phase_start(&mut self, _source: &str) {}

    fn on_progress(&mut self, _path: &str, _bytes: u64) {}
}

/// Interval-throttled progress logger.
#[derive(Debug)]
pub struct LoadProgress {
    interval: Duration,
    started: Instant,
    last_report: Instant,
    records: u64,
    bytes: u64,
    reported_records: u64,
    reported_bytes: u64,
    reports: usize,
}

impl LoadProgress {
    /// Create a progress logger that reports at most once per `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            interval,
            started: now,
            last_report: now,
            records: 0,
            bytes: 0,
            reported_records: 0,
            reported_bytes: 0,
            reports: 0,
        }
    }

    /// Records processed so far.
    #[must_use]
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Bytes processed so far.
    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Number of interval reports emitted.
    #[must_use]
    pub fn reports(&self) -> usize {
        self.reports
    }

    fn record_at(&mut self, path: &str, bytes: u64, now: Instant) {
        self.records += 1;
        self.bytes = self.bytes.saturating_add(bytes);

        if now.duration_since(self.last_report) < self.interval {
            return;
        }
        self.last_report = now;
        self.reports += 1;

        let new_records = self.records - self.reported_records;
        let new_bytes = self.bytes - self.reported_bytes;
        self.reported_records = self.records;
        self.reported_bytes = self.bytes;

        log::info!(
            "[{}s] on {}",
            now.duration_since(self.started).as_secs(),
            truncate_path(path, 60)
        );
        log::info!(
            "processed {} records ({} new) and {} of data ({} new)",
            self.records,
            new_records,
            human_size(self.bytes),
            human_size(new_bytes)
        );
    }
}

impl Default for LoadProgress {
    fn default() -> Self {
        Self::new(Duration::from_secs(5 * 60))
    }
}

impl ProgressCallback for LoadProgress {
    fn on_phase_start(&mut self, source: &str) {
        let now = Instant::now();
        self.started = now;
        self.last_report = now;
        log::info!("Loading index {}", source);
    }

    fn on_progress(&mut self, path: &str, bytes: u64) {
        self.record_at(path, bytes, Instant::now());
    }

    fn on_phase_end(&mut self) {
        log::info!(
            "Load finished in {:.1?}: {} records, {} of data",
            self.started.elapsed(),
            self.records,
            human_size(self.bytes)
        );
    }
}

/// Shorten a path for a log line, keeping its tail.
fn truncate_path(path: &str, max_len: usize) -> String {
    let count = path.chars().count();
    if count <= max_len {
        return path.to_string();
    }
    let tail: String = path.chars().skip(count - (max_len - 3)).collect();
    format!("...{}", tail)
}
