//! Brightness-based frame classification.
//!
//! A frame's brightness is the mean of its HSV value channel. For 8-bit
//! imagery the value of a pixel is simply `max(R, G, B)`, so no full HSV
//! conversion is needed. The mean is then compared against two fixed
//! thresholds to pick a [`Category`].
//!
//! Every frame is classified on its own. There is no smoothing across
//! frames, so a video that hovers around a threshold will flip between
//! labels from one frame to the next.
//!
//! # Example
//!
//! ```
//! use daypart::{Category, categorize};
//! use image::{Rgb, RgbImage};
//!
//! let frame = RgbImage::from_pixel(4, 4, Rgb([180, 120, 60]));
//! assert_eq!(categorize(&frame), Category::Day);
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use image::RgbImage;

/// Mean brightness strictly above this value is [`Category::Day`].
pub const DAY_THRESHOLD: f64 = 100.0;

/// Mean brightness strictly above this value (and not above
/// [`DAY_THRESHOLD`]) is [`Category::Evening`].
pub const EVENING_THRESHOLD: f64 = 50.0;

/// Lighting category assigned to a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Mean brightness above [`DAY_THRESHOLD`].
    Day,
    /// Mean brightness in `(EVENING_THRESHOLD, DAY_THRESHOLD]`.
    Evening,
    /// Everything else.
    Night,
}

impl Category {
    /// All categories, in reporting order.
    pub const ALL: [Category; 3] = [Category::Day, Category::Evening, Category::Night];

    /// Map a mean brightness value to a category.
    ///
    /// Both thresholds are exclusive: exactly `100.0` is Evening and
    /// exactly `50.0` is Night.
    pub fn from_brightness(brightness: f64) -> Self {
        if brightness > DAY_THRESHOLD {
            Category::Day
        } else if brightness > EVENING_THRESHOLD {
            Category::Evening
        } else {
            Category::Night
        }
    }

    /// Human-readable label (`"Day"`, `"Evening"`, `"Night"`).
    pub fn label(self) -> &'static str {
        match self {
            Category::Day => "Day",
            Category::Evening => "Evening",
            Category::Night => "Night",
        }
    }

    /// Lower-case identifier used for file names and JSON keys.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Day => "day",
            Category::Evening => "evening",
            Category::Night => "night",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Category::Day => 0,
            Category::Evening => 1,
            Category::Night => 2,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// Mean of the HSV value channel over every pixel, in `0.0..=255.0`.
///
/// An image with no pixels has brightness `0.0`.
pub fn brightness(frame: &RgbImage) -> f64 {
    let pixel_count = u64::from(frame.width()) * u64::from(frame.height());
    if pixel_count == 0 {
        return 0.0;
    }

    let sum: u64 = frame
        .pixels()
        .map(|pixel| {
            let [r, g, b] = pixel.0;
            u64::from(r.max(g).max(b))
        })
        .sum();

    sum as f64 / pixel_count as f64
}

/// Classify a single decoded frame.
pub fn categorize(frame: &RgbImage) -> Category {
    Category::from_brightness(brightness(frame))
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    #[test]
    fn value_channel_is_channel_maximum() {
        let frame = RgbImage::from_pixel(2, 2, Rgb([10, 200, 30]));
        assert_eq!(brightness(&frame), 200.0);
    }

    #[test]
    fn brightness_is_mean_over_pixels() {
        let mut frame = RgbImage::new(2, 1);
        frame.put_pixel(0, 0, Rgb([0, 0, 0]));
        frame.put_pixel(1, 0, Rgb([0, 0, 201]));
        assert_eq!(brightness(&frame), 100.5);
        assert_eq!(categorize(&frame), Category::Day);
    }

    #[test]
    fn empty_frame_is_night() {
        let frame = RgbImage::new(0, 0);
        assert_eq!(brightness(&frame), 0.0);
        assert_eq!(categorize(&frame), Category::Night);
    }

    #[test]
    fn indices_are_distinct() {
        let mut seen = [false; 3];
        for category in Category::ALL {
            assert!(!seen[category.index()]);
            seen[category.index()] = true;
        }
    }
}
