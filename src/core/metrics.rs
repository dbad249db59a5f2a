//! Log file metrics
//!
//! Counters for entries and bytes written, stream opens and closes, and
//! writes that failed at the IO layer.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one log file
///
/// # Example
///
/// ```
/// use rust_log_file::LogFileMetrics;
///
/// let metrics = LogFileMetrics::new();
/// metrics.record_write(12);
/// metrics.record_write(8);
///
/// assert_eq!(metrics.entries_written(), 2);
/// assert_eq!(metrics.bytes_written(), 20);
/// ```
#[derive(Debug)]
pub struct LogFileMetrics {
    entries_written: AtomicU64,
    bytes_written: AtomicU64,
    opens: AtomicU64,
    closes: AtomicU64,
    failed_writes: AtomicU64,
}

impl LogFileMetrics {
    pub const fn new() -> Self {
        Self {
            entries_written: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            opens: AtomicU64::new(0),
            closes: AtomicU64::new(0),
            failed_writes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_write(&self, bytes: usize) {
        self.entries_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_open(&self) {
        self.opens.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_close(&self) {
        self.closes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_failed_write(&self) {
        self.failed_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn entries_written(&self) -> u64 {
        self.entries_written.load(Ordering::Relaxed)
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    pub fn opens(&self) -> u64 {
        self.opens.load(Ordering::Relaxed)
    }

    pub fn closes(&self) -> u64 {
        self.closes.load(Ordering::Relaxed)
    }

    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }
}

impl Default for LogFileMetrics {
    fn default() -> Self {
        Self::new()
    }
}
