//! Core [`VideoFile`] implementation.
//!
//! `VideoFile` opens a container, selects the best video stream, and caches
//! its [`VideoMetadata`]. Decoding happens through
//! [`frames`](VideoFile::frames), which hands out a lazy
//! [`FrameIterator`].

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{codec::context::Context as CodecContext, format::context::Input, media::Type};

use crate::{error::DaypartError, frame_iterator::FrameIterator, metadata::VideoMetadata};

/// An opened video file, ready to be decoded frame by frame.
///
/// The demuxer context is owned by this struct and closed when it is
/// dropped.
///
/// # Example
///
/// ```no_run
/// use daypart::{DaypartError, VideoFile};
///
/// let mut video = VideoFile::open("input.mp4")?;
/// for result in video.frames()? {
///     let (frame_number, image) = result?;
///     println!("frame {frame_number}: {}x{}", image.width(), image.height());
/// }
/// # Ok::<(), DaypartError>(())
/// ```
pub struct VideoFile {
    pub(crate) input_context: Input,
    pub(crate) video_stream_index: usize,
    pub(crate) metadata: VideoMetadata,
    pub(crate) file_path: PathBuf,
}

impl Debug for VideoFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoFile")
            .field("metadata", &self.metadata)
            .field("video_stream_index", &self.video_stream_index)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl VideoFile {
    /// Open a video file for decoding.
    ///
    /// Initializes FFmpeg (idempotent), opens the container, and locates the
    /// best video stream.
    ///
    /// # Errors
    ///
    /// Returns [`DaypartError::FileOpen`] if the file cannot be opened or its
    /// decoder cannot be created, and [`DaypartError::NoVideoStream`] if the
    /// container has no video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DaypartError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        ffmpeg_next::init().map_err(|error| DaypartError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| DaypartError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(DaypartError::NoVideoStream)?;
        let video_stream_index = stream.index();

        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let decoder_context =
            CodecContext::from_parameters(stream.parameters()).map_err(|error| {
                DaypartError::FileOpen {
                    path: file_path.clone(),
                    reason: format!("Failed to read video codec parameters: {error}"),
                }
            })?;
        let decoder = decoder_context
            .decoder()
            .video()
            .map_err(|error| DaypartError::FileOpen {
                path: file_path.clone(),
                reason: format!("Failed to create video decoder: {error}"),
            })?;

        let frame_rate = stream.avg_frame_rate();
        let frames_per_second = if frame_rate.denominator() != 0 {
            frame_rate.numerator() as f64 / frame_rate.denominator() as f64
        } else {
            let rate = stream.rate();
            if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            }
        };

        let frame_count = if stream.frames() > 0 {
            stream.frames() as u64
        } else if frames_per_second > 0.0 {
            (duration.as_secs_f64() * frames_per_second) as u64
        } else {
            0
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            frames_per_second,
            frame_count,
            codec,
            duration,
            format: input_context.format().name().to_string(),
        };

        log::debug!(
            "Selected video stream {video_stream_index}: {}x{} @ {:.2} fps [{}]",
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.codec,
        );

        Ok(Self {
            input_context,
            video_stream_index,
            metadata,
            file_path,
        })
    }

    /// Metadata of the selected video stream.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Path this file was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Decode every frame of the video stream, in decode order.
    ///
    /// The iterator borrows the file mutably; the decoder and scaler it
    /// creates are released when it is dropped.
    pub fn frames(&mut self) -> Result<FrameIterator<'_>, DaypartError> {
        FrameIterator::new(self)
    }
}
