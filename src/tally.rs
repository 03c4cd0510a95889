//! Per-category counters and the finished [`ScanResult`].
//!
//! [`FrameTally`] is the mutable accumulator driven by the scan loop. Once
//! decoding ends it is consumed into a [`ScanResult`], whose counts can no
//! longer change.

use image::RgbImage;

use crate::classify::{self, Category};

/// The first frame assigned to a category during a scan.
#[derive(Debug, Clone)]
pub struct SampleFrame {
    /// Zero-based position of the frame in decode order.
    pub frame_number: u64,
    /// The frame itself, in RGB channel order.
    pub image: RgbImage,
}

/// Running counters for an in-progress scan.
///
/// Each category owns its own sample slot, filled by the first frame that
/// lands in it and never replaced afterwards.
///
/// # Example
///
/// ```
/// use daypart::{Category, FrameTally};
/// use image::{Rgb, RgbImage};
///
/// let mut tally = FrameTally::new();
/// tally.record(RgbImage::from_pixel(2, 2, Rgb([200, 200, 200])));
/// tally.record(RgbImage::from_pixel(2, 2, Rgb([10, 10, 10])));
///
/// let result = tally.finish();
/// assert_eq!(result.total_frames(), 2);
/// assert_eq!(result.count(Category::Day), 1);
/// assert_eq!(result.sample(Category::Night).unwrap().frame_number, 1);
/// ```
#[derive(Debug, Default)]
pub struct FrameTally {
    counts: [u64; 3],
    samples: [Option<SampleFrame>; 3],
    total_frames: u64,
}

impl FrameTally {
    /// An empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `image`, count it, and keep it if it is the first frame of
    /// its category. Returns the assigned category.
    pub fn record(&mut self, image: RgbImage) -> Category {
        let category = classify::categorize(&image);
        self.record_as(category, image);
        category
    }

    /// Count an already-classified frame.
    pub(crate) fn record_as(&mut self, category: Category, image: RgbImage) {
        let slot = category.index();
        self.counts[slot] += 1;
        if self.samples[slot].is_none() {
            self.samples[slot] = Some(SampleFrame {
                frame_number: self.total_frames,
                image,
            });
        }
        self.total_frames += 1;
    }

    /// Frames recorded so far.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Freeze the counters.
    pub fn finish(self) -> ScanResult {
        let [day_count, evening_count, night_count] = self.counts;
        let [day_sample, evening_sample, night_sample] = self.samples;
        ScanResult {
            total_frames: self.total_frames,
            day_count,
            evening_count,
            night_count,
            day_sample,
            evening_sample,
            night_sample,
        }
    }
}

/// Percentages of frames per category, each in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentages {
    /// Share of Day frames.
    pub day: f64,
    /// Share of Evening frames.
    pub evening: f64,
    /// Share of Night frames.
    pub night: f64,
}

impl Percentages {
    /// Share for one category.
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Day => self.day,
            Category::Evening => self.evening,
            Category::Night => self.night,
        }
    }
}

/// Aggregate statistics of a completed scan.
///
/// `day_count + evening_count + night_count == total_frames` always holds.
#[derive(Debug, Clone)]
#[must_use]
pub struct ScanResult {
    total_frames: u64,
    day_count: u64,
    evening_count: u64,
    night_count: u64,
    day_sample: Option<SampleFrame>,
    evening_sample: Option<SampleFrame>,
    night_sample: Option<SampleFrame>,
}

impl ScanResult {
    /// A result with no frames, as produced by an unreadable source.
    pub fn empty() -> Self {
        FrameTally::new().finish()
    }

    /// Number of frames classified.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// `true` when no frame was decoded.
    pub fn is_empty(&self) -> bool {
        self.total_frames == 0
    }

    /// Number of frames assigned to `category`.
    pub fn count(&self, category: Category) -> u64 {
        match category {
            Category::Day => self.day_count,
            Category::Evening => self.evening_count,
            Category::Night => self.night_count,
        }
    }

    /// `count(category) / total_frames × 100`, or `None` for an empty scan.
    pub fn percentage(&self, category: Category) -> Option<f64> {
        if self.total_frames == 0 {
            return None;
        }
        Some(self.count(category) as f64 / self.total_frames as f64 * 100.0)
    }

    /// All three percentages, or `None` for an empty scan.
    pub fn percentages(&self) -> Option<Percentages> {
        Some(Percentages {
            day: self.percentage(Category::Day)?,
            evening: self.percentage(Category::Evening)?,
            night: self.percentage(Category::Night)?,
        })
    }

    /// The first frame assigned to `category`, if any frame was.
    pub fn sample(&self, category: Category) -> Option<&SampleFrame> {
        match category {
            Category::Day => self.day_sample.as_ref(),
            Category::Evening => self.evening_sample.as_ref(),
            Category::Night => self.night_sample.as_ref(),
        }
    }

    /// Samples of every observed category, in reporting order.
    pub fn samples(&self) -> impl Iterator<Item = (Category, &SampleFrame)> {
        Category::ALL
            .into_iter()
            .filter_map(|category| self.sample(category).map(|sample| (category, sample)))
    }
}
