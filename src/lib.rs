//! # daypart
//!
//! Classify the frames of a video as Day, Evening, or Night by brightness.
//!
//! Every frame is decoded with FFmpeg (via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate), converted to
//! RGB, and labelled from the mean of its HSV value channel:
//!
//! | Mean brightness | Category |
//! |-----------------|----------|
//! | above 100       | Day      |
//! | above 50        | Evening  |
//! | otherwise       | Night    |
//!
//! A scan returns how many frames fell into each category together with the
//! first frame seen for each one.
//!
//! ## Quick Start
//!
//! ```no_run
//! use daypart::{Category, DaypartError, ScanOptions};
//!
//! let result = daypart::scan_file("input.mp4", &ScanOptions::new())?;
//! println!("Total frames processed: {}", result.total_frames());
//! for category in Category::ALL {
//!     if let Some(percentage) = result.percentage(category) {
//!         println!("{category} Percentage: {percentage:.2}%");
//!     }
//! }
//! daypart::report::save_samples(&result, "samples".as_ref())?;
//! # Ok::<(), DaypartError>(())
//! ```
//!
//! ## Remote videos
//!
//! [`analyze`] accepts a path or a URL. URLs are downloaded to a local file
//! with [`YtDlpDownloader`] before scanning, and the result comes back as an
//! [`Outcome`] that tells a failed download apart from a failed scan.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed. URL inputs additionally
//! need the `yt-dlp` program on `PATH`.

pub mod analysis;
pub mod classify;
pub mod configuration;
mod conversion;
pub mod download;
pub mod error;
pub mod ffmpeg;
pub mod frame_iterator;
pub mod metadata;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod tally;
pub mod video_file;

pub use analysis::{Input, Outcome, analyze};
pub use classify::{Category, DAY_THRESHOLD, EVENING_THRESHOLD, brightness, categorize};
pub use configuration::ScanOptions;
pub use download::{DEFAULT_DOWNLOAD_PATH, Downloader, YtDlpDownloader};
pub use error::DaypartError;
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use frame_iterator::FrameIterator;
pub use metadata::VideoMetadata;
pub use progress::{CancellationToken, ProgressCallback, ProgressInfo};
pub use scanner::{scan_file, scan_frames, scan_video};
pub use tally::{FrameTally, Percentages, SampleFrame, ScanResult};
pub use video_file::VideoFile;
