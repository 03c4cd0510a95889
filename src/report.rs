//! Presenting a [`ScanResult`].
//!
//! Text output matches what a person reads at the terminal, JSON output is
//! for scripts, and [`save_samples`] writes one PNG per observed category.

use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::{classify::Category, error::DaypartError, tally::ScanResult};

/// Format a percentage with two decimals, e.g. `"33.33"`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}")
}

/// Multi-line summary of a scan.
///
/// ```
/// use daypart::FrameTally;
/// use image::{Rgb, RgbImage};
///
/// let mut tally = FrameTally::new();
/// tally.record(RgbImage::from_pixel(1, 1, Rgb([255, 255, 255])));
/// let text = daypart::report::render_text(&tally.finish());
/// assert!(text.contains("Day Percentage: 100.00%"));
/// ```
pub fn render_text(result: &ScanResult) -> String {
    if result.is_empty() {
        return "No frames processed.\n".to_string();
    }

    let mut text = format!("Total frames processed: {}\n", result.total_frames());
    for category in Category::ALL {
        if let Some(percentage) = result.percentage(category) {
            text.push_str(&format!(
                "{} Percentage: {}%\n",
                category.label(),
                format_percentage(percentage)
            ));
        }
    }
    text
}

/// Machine-readable summary. Percentages are omitted for an empty scan.
pub fn to_json(result: &ScanResult) -> Value {
    let mut categories = serde_json::Map::new();
    for category in Category::ALL {
        categories.insert(
            category.slug().to_string(),
            json!({
                "count": result.count(category),
                "percentage": result.percentage(category),
                "sample_frame": result.sample(category).map(|sample| sample.frame_number),
            }),
        );
    }

    json!({
        "total_frames": result.total_frames(),
        "categories": categories,
    })
}

/// File name used for a category's sample, e.g. `sample_evening.png`.
pub fn sample_file_name(category: Category) -> String {
    format!("sample_{}.png", category.slug())
}

/// Write each retained sample frame into `directory` as PNG.
///
/// Existing files with the same name are replaced. Returns the written
/// paths in reporting order.
pub fn save_samples(
    result: &ScanResult,
    directory: &Path,
) -> Result<Vec<PathBuf>, DaypartError> {
    std::fs::create_dir_all(directory)?;

    let mut written = Vec::new();
    for (category, sample) in result.samples() {
        let path = directory.join(sample_file_name(category));
        sample.image.save(&path)?;
        log::debug!(
            "Saved {category} sample (frame {}) to {}",
            sample.frame_number,
            path.display()
        );
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;
    use crate::FrameTally;

    fn result_from_levels(levels: &[u8]) -> ScanResult {
        let mut tally = FrameTally::new();
        for &level in levels {
            tally.record(RgbImage::from_pixel(2, 2, Rgb([level, level, level])));
        }
        tally.finish()
    }

    #[test]
    fn text_lists_every_category() {
        let text = render_text(&result_from_levels(&[200, 75, 10]));
        assert_eq!(
            text,
            "Total frames processed: 3\n\
             Day Percentage: 33.33%\n\
             Evening Percentage: 33.33%\n\
             Night Percentage: 33.33%\n"
        );
    }

    #[test]
    fn empty_text_says_no_frames() {
        assert_eq!(render_text(&ScanResult::empty()), "No frames processed.\n");
    }

    #[test]
    fn json_has_counts_and_samples() {
        let value = to_json(&result_from_levels(&[10, 200, 200]));
        assert_eq!(value["total_frames"], 3);
        assert_eq!(value["categories"]["day"]["count"], 2);
        assert_eq!(value["categories"]["day"]["sample_frame"], 1);
        assert_eq!(value["categories"]["night"]["sample_frame"], 0);
        assert!(value["categories"]["evening"]["sample_frame"].is_null());
    }

    #[test]
    fn json_percentages_null_when_empty() {
        let value = to_json(&ScanResult::empty());
        assert!(value["categories"]["day"]["percentage"].is_null());
    }
}
