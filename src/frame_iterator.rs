//! Lazy, pull-based iterator over every decoded video frame.
//!
//! [`FrameIterator`] reads and decodes just enough packets to produce the
//! next frame, converts it to packed RGB, and yields it together with its
//! zero-based position in decode order. Nothing is buffered beyond the
//! frame being handed out.
//!
//! Create one via [`VideoFile::frames`](crate::VideoFile::frames).

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::RgbImage;

use crate::{conversion, error::DaypartError, video_file::VideoFile};

/// Converter from the decoder's native pixel format to RGB24.
///
/// Built from the first decoded frame rather than the codec parameters,
/// since the two can disagree, and rebuilt whenever the frame geometry or
/// format changes.
struct RgbScaler {
    context: ScalingContext,
    source_format: Pixel,
    width: u32,
    height: u32,
}

impl RgbScaler {
    fn new(frame: &VideoFrame) -> Result<Self, DaypartError> {
        let context = ScalingContext::get(
            frame.format(),
            frame.width(),
            frame.height(),
            Pixel::RGB24,
            frame.width(),
            frame.height(),
            ScalingFlags::BILINEAR,
        )?;
        Ok(Self {
            context,
            source_format: frame.format(),
            width: frame.width(),
            height: frame.height(),
        })
    }

    fn matches(&self, frame: &VideoFrame) -> bool {
        self.source_format == frame.format()
            && self.width == frame.width()
            && self.height == frame.height()
    }
}

/// A lazy iterator over all decoded frames of a [`VideoFile`].
///
/// Yields `(frame_number, image)` pairs where `frame_number` counts frames
/// in the order the decoder produced them, starting at 0. After the first
/// error the iterator is exhausted.
pub struct FrameIterator<'a> {
    video: &'a mut VideoFile,
    decoder: VideoDecoder,
    scaler: Option<RgbScaler>,
    decoded_frame: VideoFrame,
    rgb_frame: VideoFrame,
    next_frame_number: u64,
    eof_sent: bool,
    done: bool,
}

impl<'a> FrameIterator<'a> {
    pub(crate) fn new(video: &'a mut VideoFile) -> Result<Self, DaypartError> {
        let stream = video
            .input_context
            .stream(video.video_stream_index)
            .ok_or(DaypartError::NoVideoStream)?;
        let decoder_context = CodecContext::from_parameters(stream.parameters())?;
        let decoder = decoder_context.decoder().video()?;

        Ok(Self {
            video,
            decoder,
            scaler: None,
            decoded_frame: VideoFrame::empty(),
            rgb_frame: VideoFrame::empty(),
            next_frame_number: 0,
            eof_sent: false,
            done: false,
        })
    }

    /// Convert the current `decoded_frame` to an [`RgbImage`].
    fn convert_current_frame(&mut self) -> Result<RgbImage, DaypartError> {
        let stale = self
            .scaler
            .as_ref()
            .is_none_or(|scaler| !scaler.matches(&self.decoded_frame));
        if stale {
            self.scaler = Some(RgbScaler::new(&self.decoded_frame)?);
            self.rgb_frame = VideoFrame::empty();
        }

        let Some(scaler) = self.scaler.as_mut() else {
            return Err(DaypartError::VideoDecodeError(
                "RGB scaler unavailable".to_string(),
            ));
        };
        scaler
            .context
            .run(&self.decoded_frame, &mut self.rgb_frame)?;

        conversion::rgb_frame_to_image(&self.rgb_frame)
    }

    /// Signal end of input to the decoder so it flushes buffered frames.
    fn send_eof(&mut self) -> Result<(), DaypartError> {
        self.eof_sent = true;
        self.decoder.send_eof()?;
        Ok(())
    }
}

impl Iterator for FrameIterator<'_> {
    type Item = Result<(u64, RgbImage), DaypartError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                return match self.convert_current_frame() {
                    Ok(image) => {
                        let frame_number = self.next_frame_number;
                        self.next_frame_number += 1;
                        Some(Ok((frame_number, image)))
                    }
                    Err(error) => {
                        self.done = true;
                        Some(Err(error))
                    }
                };
            }

            if self.eof_sent {
                self.done = true;
                return None;
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.video.input_context) {
                Ok(()) => {
                    if packet.stream() == self.video.video_stream_index {
                        if let Err(error) = self.decoder.send_packet(&packet) {
                            self.done = true;
                            return Some(Err(DaypartError::from(error)));
                        }
                    }
                }
                Err(FfmpegError::Eof) => {
                    if let Err(error) = self.send_eof() {
                        self.done = true;
                        return Some(Err(error));
                    }
                }
                Err(error) => {
                    // A broken container ends the stream; drain what the
                    // decoder already holds first.
                    log::debug!("Packet read failed, treating as end of stream: {error}");
                    if let Err(error) = self.send_eof() {
                        self.done = true;
                        return Some(Err(error));
                    }
                }
            }
        }
    }
}
