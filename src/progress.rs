//! Progress reporting and cancellation for long scans.
//!
//! A scan blocks until the whole video has been decoded. [`ProgressCallback`]
//! lets a caller observe it and [`CancellationToken`] lets another thread
//! stop it between frames.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use daypart::{DaypartError, ProgressCallback, ProgressInfo, ScanOptions};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("{pct:.1}% scanned");
//!         }
//!     }
//! }
//!
//! let options = ScanOptions::new()
//!     .with_progress(Arc::new(PrintProgress))
//!     .with_batch_size(100);
//! let result = daypart::scan_file("input.mp4", &options)?;
//! # Ok::<(), DaypartError>(())
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

use crate::classify::Category;

/// A snapshot of scan progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Frames classified so far.
    pub current: u64,
    /// Estimated frame count from the container, if known.
    ///
    /// This is an estimate, so `current` may end up above it.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time elapsed since the scan started.
    pub elapsed: Duration,
    /// Category of the most recent frame, absent on the final report.
    pub last_category: Option<Category>,
}

/// Receives progress updates during a scan.
///
/// Callbacks observe but cannot halt the scan; use [`CancellationToken`]
/// for that.
pub trait ProgressCallback: Send + Sync {
    /// Called every `batch_size` frames and once when the scan ends.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. The default.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Cooperative cancellation token backed by an [`AtomicBool`].
///
/// Clones share state. The scan loop checks
/// [`is_cancelled`](CancellationToken::is_cancelled) before each frame.
///
/// ```
/// use daypart::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation. All clones observe it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks scan timing and fires the callback every `batch_size` frames.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    total: Option<u64>,
    current: u64,
    batch_size: u64,
    start_time: Instant,
    since_last_report: u64,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        total: Option<u64>,
        batch_size: u64,
    ) -> Self {
        Self {
            callback,
            total: total.filter(|&t| t > 0),
            current: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            since_last_report: 0,
        }
    }

    /// Record one classified frame.
    pub(crate) fn advance(&mut self, category: Category) {
        self.current += 1;
        self.since_last_report += 1;

        if self.since_last_report >= self.batch_size {
            self.report(Some(category));
            self.since_last_report = 0;
        }
    }

    /// Unconditionally emit a final report.
    pub(crate) fn finish(&mut self) {
        self.report(None);
    }

    fn report(&self, last_category: Option<Category>) {
        let percentage = self
            .total
            .map(|t| ((self.current as f32 / t as f32) * 100.0).min(100.0));

        self.callback.on_progress(&ProgressInfo {
            current: self.current,
            total: self.total,
            percentage,
            elapsed: self.start_time.elapsed(),
            last_category,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct Recorder(Mutex<Vec<ProgressInfo>>);

    impl ProgressCallback for Recorder {
        fn on_progress(&self, info: &ProgressInfo) {
            self.0.lock().unwrap().push(info.clone());
        }
    }

    #[test]
    fn reports_every_batch_and_on_finish() {
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let mut tracker = ProgressTracker::new(recorder.clone(), Some(5), 2);
        for _ in 0..5 {
            tracker.advance(Category::Night);
        }
        tracker.finish();

        let infos = recorder.0.lock().unwrap();
        let currents: Vec<u64> = infos.iter().map(|info| info.current).collect();
        assert_eq!(currents, vec![2, 4, 5]);
        assert_eq!(infos[0].last_category, Some(Category::Night));
        assert!(infos[2].last_category.is_none());
        assert_eq!(infos[2].percentage, Some(100.0));
    }

    #[test]
    fn unknown_total_has_no_percentage() {
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let mut tracker = ProgressTracker::new(recorder.clone(), Some(0), 1);
        tracker.advance(Category::Day);

        let infos = recorder.0.lock().unwrap();
        assert_eq!(infos.len(), 1);
        assert!(infos[0].total.is_none());
        assert!(infos[0].percentage.is_none());
    }
}
