//! Scan configuration.
//!
//! [`ScanOptions`] is a builder that threads progress callbacks,
//! cancellation tokens, and the open-failure policy through the scanner
//! without widening every function signature. The brightness thresholds are
//! deliberately absent: they are fixed constants in [`crate::classify`].
//!
//! # Example
//!
//! ```
//! use daypart::{CancellationToken, ScanOptions};
//!
//! let token = CancellationToken::new();
//! let options = ScanOptions::new()
//!     .with_cancellation(token.clone())
//!     .with_frame_limit(500)
//!     .with_strict_open(true);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::progress::{CancellationToken, NoOpProgress, ProgressCallback};

/// Options for a single scan.
///
/// A default-constructed value scans every frame, reports no progress, and
/// turns an unopenable source into an empty result.
#[derive(Clone)]
pub struct ScanOptions {
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) cancellation: Option<CancellationToken>,
    pub(crate) batch_size: u64,
    pub(crate) frame_limit: Option<u64>,
    pub(crate) strict_open: bool,
}

impl Debug for ScanOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ScanOptions")
            .field("has_cancellation", &self.cancellation.is_some())
            .field("batch_size", &self.batch_size)
            .field("frame_limit", &self.frame_limit)
            .field("strict_open", &self.strict_open)
            .finish_non_exhaustive()
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanOptions {
    /// Defaults: no progress callback, no cancellation, batch size 1, no
    /// frame limit, lenient open.
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoOpProgress),
            cancellation: None,
            batch_size: 1,
            frame_limit: None,
            strict_open: false,
        }
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token.
    ///
    /// A cancelled scan returns [`DaypartError::Cancelled`](crate::DaypartError::Cancelled)
    /// and discards the counts gathered so far.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Fire the progress callback every `size` frames. Clamped to at least 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Stop after `limit` frames instead of decoding to the end.
    ///
    /// The result covers only the frames that were classified.
    #[must_use]
    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    /// When `true`, a source that cannot be opened is reported as an error
    /// instead of an empty result.
    #[must_use]
    pub fn with_strict_open(mut self, strict: bool) -> Self {
        self.strict_open = strict;
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}
