//! Internal helpers for turning FFmpeg frames into `image` buffers.

use ffmpeg_next::frame::Video as VideoFrame;
use image::RgbImage;

use crate::error::DaypartError;

/// Copy plane 0 of a packed RGB24 frame into a tightly-packed buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × 3), which
/// is stripped here so the result can go straight into [`RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_bytes = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == row_bytes {
        data[..row_bytes * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_bytes * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_bytes]);
        }
        buffer
    }
}

/// Build an [`RgbImage`] from a scaled RGB24 frame.
pub(crate) fn rgb_frame_to_image(rgb_frame: &VideoFrame) -> Result<RgbImage, DaypartError> {
    let width = rgb_frame.width();
    let height = rgb_frame.height();
    let buffer = frame_to_rgb_buffer(rgb_frame, width, height);
    RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        DaypartError::VideoDecodeError(
            "Failed to construct RGB image from decoded frame data".to_string(),
        )
    })
}
