//! Error types for the `daypart` crate.
//!
//! [`DaypartError`] is returned by every fallible operation: opening and
//! decoding videos, downloading remote sources, and writing sample frames.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `daypart` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DaypartError {
    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoFile::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A decoded frame could not be converted to an RGB image.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while encoding a sample frame.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// The scan was cancelled via a [`CancellationToken`](crate::CancellationToken).
    #[error("Operation cancelled")]
    Cancelled,

    /// A remote video could not be materialized to a local file.
    #[error("Failed to download {url}: {reason}")]
    DownloadFailed {
        /// The URL that was requested.
        url: String,
        /// Why the downloader gave up.
        reason: String,
    },
}

impl From<FfmpegError> for DaypartError {
    fn from(error: FfmpegError) -> Self {
        DaypartError::FfmpegError(error.to_string())
    }
}
