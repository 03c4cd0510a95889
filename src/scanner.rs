//! The frame scan loop.
//!
//! Decodes frames one at a time, classifies each, and accumulates a
//! [`ScanResult`]. Decoder resources live inside the frame iterator and are
//! released when the loop exits, however it exits.
//!
//! # Example
//!
//! ```no_run
//! use daypart::{Category, DaypartError, ScanOptions};
//!
//! let result = daypart::scan_file("input.mp4", &ScanOptions::new())?;
//! if let Some(day) = result.percentage(Category::Day) {
//!     println!("Day: {day:.2}%");
//! }
//! # Ok::<(), DaypartError>(())
//! ```

use std::path::Path;

use image::RgbImage;

use crate::{
    classify,
    configuration::ScanOptions,
    error::DaypartError,
    progress::ProgressTracker,
    tally::{FrameTally, ScanResult},
    video_file::VideoFile,
};

/// Open `path` and scan every frame.
///
/// If the file cannot be opened, or has no video stream, the result is
/// empty and a warning is logged. With
/// [`ScanOptions::with_strict_open`] the open error is returned instead.
///
/// # Errors
///
/// [`DaypartError::Cancelled`] if the options' token is cancelled, and open
/// errors in strict mode.
pub fn scan_file<P: AsRef<Path>>(
    path: P,
    options: &ScanOptions,
) -> Result<ScanResult, DaypartError> {
    let path = path.as_ref();
    let mut video = match VideoFile::open(path) {
        Ok(video) => video,
        Err(error) if !options.strict_open => {
            log::warn!(
                "Could not open {}: {error}; no frames processed",
                path.display()
            );
            return Ok(ScanResult::empty());
        }
        Err(error) => return Err(error),
    };
    scan_video(&mut video, options)
}

/// Scan every frame of an already opened [`VideoFile`].
pub fn scan_video(
    video: &mut VideoFile,
    options: &ScanOptions,
) -> Result<ScanResult, DaypartError> {
    log::debug!("Scanning {}", video.path().display());

    let estimated_total = Some(video.metadata().frame_count);
    let frames = video.frames()?;
    run_scan(frames, estimated_total, options)
}

/// Scan frames from any source, such as synthetic images in tests.
///
/// Errors yielded by `frames` end the scan the same way running out of
/// frames does: the counts gathered so far are returned.
pub fn scan_frames<I>(frames: I, options: &ScanOptions) -> Result<ScanResult, DaypartError>
where
    I: IntoIterator<Item = Result<RgbImage, DaypartError>>,
{
    run_scan(frames, None, options)
}

fn run_scan<I, T>(
    frames: I,
    estimated_total: Option<u64>,
    options: &ScanOptions,
) -> Result<ScanResult, DaypartError>
where
    I: IntoIterator<Item = Result<T, DaypartError>>,
    T: IntoFrame,
{
    let mut tally = FrameTally::new();
    let mut tracker =
        ProgressTracker::new(options.progress.clone(), estimated_total, options.batch_size);

    let limit = options
        .frame_limit
        .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));

    for item in frames.into_iter().take(limit) {
        if options.is_cancelled() {
            return Err(DaypartError::Cancelled);
        }

        let image = match item {
            Ok(frame) => frame.into_image(),
            Err(error) => {
                log::warn!(
                    "Decoding stopped after {} frames: {error}",
                    tally.total_frames()
                );
                break;
            }
        };

        let category = classify::categorize(&image);
        tally.record_as(category, image);
        tracker.advance(category);
    }

    tracker.finish();

    let result = tally.finish();
    log::debug!(
        "Scan finished: {} frames ({} day, {} evening, {} night)",
        result.total_frames(),
        result.count(classify::Category::Day),
        result.count(classify::Category::Evening),
        result.count(classify::Category::Night),
    );
    Ok(result)
}

/// Anything the scan loop can take a frame image from.
trait IntoFrame {
    fn into_image(self) -> RgbImage;
}

impl IntoFrame for RgbImage {
    fn into_image(self) -> RgbImage {
        self
    }
}

impl IntoFrame for (u64, RgbImage) {
    fn into_image(self) -> RgbImage {
        self.1
    }
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;
    use crate::{Category, CancellationToken};

    fn frames(levels: &[u8]) -> Vec<Result<RgbImage, DaypartError>> {
        levels
            .iter()
            .map(|&level| Ok(RgbImage::from_pixel(4, 4, Rgb([level, level, level]))))
            .collect()
    }

    #[test]
    fn error_ends_scan_like_end_of_stream() {
        let mut items = frames(&[200, 200]);
        items.push(Err(DaypartError::VideoDecodeError("corrupt".to_string())));
        items.extend(frames(&[10]));

        let result = scan_frames(items, &ScanOptions::new()).unwrap();
        assert_eq!(result.total_frames(), 2);
        assert_eq!(result.count(Category::Night), 0);
    }

    #[test]
    fn frame_limit_breaks_early() {
        let options = ScanOptions::new().with_frame_limit(3);
        let result = scan_frames(frames(&[200, 75, 10, 10, 10]), &options).unwrap();
        assert_eq!(result.total_frames(), 3);
        assert_eq!(result.count(Category::Day), 1);
        assert_eq!(result.count(Category::Evening), 1);
        assert_eq!(result.count(Category::Night), 1);
    }

    #[test]
    fn cancelled_scan_discards_counts() {
        let token = CancellationToken::new();
        token.cancel();
        let options = ScanOptions::new().with_cancellation(token);
        let result = scan_frames(frames(&[200]), &options);
        assert!(matches!(result, Err(DaypartError::Cancelled)));
    }
}
