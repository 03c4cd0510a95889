//! One-call analysis of a path or URL.
//!
//! [`analyze`] downloads the input if it is remote, scans it, and folds
//! every way this can end into an [`Outcome`]. Download failures,
//! processing failures, and an empty video are distinct variants so callers
//! can report each one differently.
//!
//! # Example
//!
//! ```no_run
//! use daypart::{Input, Outcome, ScanOptions, YtDlpDownloader};
//!
//! let input = Input::parse("https://example.com/clip.mp4");
//! match daypart::analyze(&input, &ScanOptions::new(), &YtDlpDownloader::new()) {
//!     Outcome::Processed(result) => print!("{}", daypart::report::render_text(&result)),
//!     Outcome::NoFrames => println!("No frames processed."),
//!     outcome => eprintln!("{}", outcome.message().unwrap_or_default()),
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::{
    configuration::ScanOptions,
    download::{DEFAULT_DOWNLOAD_PATH, Downloader},
    error::DaypartError,
    scanner,
    tally::ScanResult,
};

/// Where a video comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A file on the local file system.
    Path(PathBuf),
    /// A remote resource to download first.
    Url {
        /// The URL as given.
        url: String,
        /// Local file the download is written to.
        destination: PathBuf,
    },
}

impl Input {
    /// Treat strings containing `://` as URLs and everything else as paths.
    ///
    /// `file://` URLs name a local file and become paths; the remainder is
    /// used as-is, without percent-decoding. Other URLs download to
    /// [`DEFAULT_DOWNLOAD_PATH`].
    pub fn parse(value: &str) -> Self {
        if let Some(path) = value.strip_prefix("file://") {
            Input::Path(PathBuf::from(path))
        } else if value.contains("://") {
            Input::Url {
                url: value.to_string(),
                destination: PathBuf::from(DEFAULT_DOWNLOAD_PATH),
            }
        } else {
            Input::Path(PathBuf::from(value))
        }
    }

    /// Change where a URL input is downloaded to. No effect on paths.
    #[must_use]
    pub fn with_destination<P: Into<PathBuf>>(self, path: P) -> Self {
        match self {
            Input::Url { url, .. } => Input::Url {
                url,
                destination: path.into(),
            },
            input => input,
        }
    }

    /// The local file that will be scanned.
    pub fn local_path(&self) -> &Path {
        match self {
            Input::Path(path) => path,
            Input::Url { destination, .. } => destination,
        }
    }
}

/// How an analysis ended.
#[derive(Debug)]
pub enum Outcome {
    /// At least one frame was classified.
    Processed(ScanResult),
    /// The video yielded no frames, including unreadable local files.
    NoFrames,
    /// The remote input could not be downloaded.
    DownloadFailed(String),
    /// Scanning failed, e.g. strict open or cancellation.
    ProcessingFailed(String),
}

impl Outcome {
    /// Fold a scan result into an outcome.
    pub fn from_scan(result: Result<ScanResult, DaypartError>) -> Self {
        match result {
            Ok(result) if result.is_empty() => Outcome::NoFrames,
            Ok(result) => Outcome::Processed(result),
            Err(error) => Outcome::ProcessingFailed(error.to_string()),
        }
    }

    /// The scan result, if frames were processed.
    pub fn result(&self) -> Option<&ScanResult> {
        match self {
            Outcome::Processed(result) => Some(result),
            _ => None,
        }
    }

    /// `true` for the two failure variants.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::DownloadFailed(_) | Outcome::ProcessingFailed(_))
    }

    /// User-facing text for every variant except `Processed`.
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::Processed(_) => None,
            Outcome::NoFrames => Some("No frames processed.".to_string()),
            Outcome::DownloadFailed(reason) => Some(format!("Error downloading video: {reason}")),
            Outcome::ProcessingFailed(reason) => Some(format!("Error processing video: {reason}")),
        }
    }
}

/// Download `input` if needed, then scan it.
///
/// The download completes before decoding begins.
pub fn analyze(input: &Input, options: &ScanOptions, downloader: &dyn Downloader) -> Outcome {
    let path = match input {
        Input::Path(path) => path.clone(),
        Input::Url { url, destination } => match downloader.download(url, destination) {
            Ok(path) => path,
            Err(error) => {
                log::warn!("{error}");
                let reason = match error {
                    DaypartError::DownloadFailed { reason, .. } => reason,
                    other => other.to_string(),
                };
                return Outcome::DownloadFailed(reason);
            }
        },
    };

    Outcome::from_scan(scanner::scan_file(&path, options))
}
