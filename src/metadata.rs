//! Video stream metadata.
//!
//! [`VideoMetadata`] is read once when a [`VideoFile`](crate::VideoFile) is
//! opened and cached for its lifetime.

use std::time::Duration;

/// Metadata for the video stream selected for scanning.
///
/// # Example
///
/// ```no_run
/// use daypart::VideoFile;
///
/// let video = VideoFile::open("input.mp4").unwrap();
/// let metadata = video.metadata();
/// println!("{}x{} @ {:.2} fps", metadata.width, metadata.height, metadata.frames_per_second);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (may be approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Estimated total number of frames, computed from duration and frame rate.
    ///
    /// Only used for progress reporting; the scan counts what it actually
    /// decodes.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`).
    pub codec: String,
    /// Container-level duration. Zero when the container does not say.
    pub duration: Duration,
    /// Container format name (e.g. `"mov,mp4,m4a,3gp,3g2,mj2"`).
    pub format: String,
}
