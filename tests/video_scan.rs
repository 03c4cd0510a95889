//! Scanning real video files.
//!
//! Tests require fixture files from `tests/fixtures/generate_fixtures.sh`.

use std::path::Path;

use daypart::{Category, ScanOptions, VideoFile, scan_file, scan_video};

fn bright_video_path() -> &'static str {
    "tests/fixtures/bright.mp4"
}

fn dark_video_path() -> &'static str {
    "tests/fixtures/dark.mp4"
}

fn mixed_video_path() -> &'static str {
    "tests/fixtures/mixed.mp4"
}

// ── whole-file scans ───────────────────────────────────────────────

#[test]
fn bright_video_is_all_day() {
    let path = bright_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let result = scan_file(path, &ScanOptions::new()).expect("Failed to scan fixture");
    assert_eq!(result.total_frames(), 10);
    assert_eq!(result.count(Category::Day), 10);
    assert_eq!(result.count(Category::Evening), 0);
    assert_eq!(result.count(Category::Night), 0);
    assert_eq!(result.percentage(Category::Day), Some(100.0));
}

#[test]
fn dark_video_is_all_night() {
    let path = dark_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let result = scan_file(path, &ScanOptions::new()).expect("Failed to scan fixture");
    assert!(result.total_frames() > 0);
    assert_eq!(result.count(Category::Night), result.total_frames());
    assert!(result.sample(Category::Day).is_none());
}

#[test]
fn mixed_video_counts_and_samples() {
    let path = mixed_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let result = scan_file(path, &ScanOptions::new()).expect("Failed to scan fixture");
    assert_eq!(result.total_frames(), 15);
    for category in Category::ALL {
        assert_eq!(result.count(category), 5, "{category}");
    }

    assert_eq!(result.sample(Category::Day).unwrap().frame_number, 0);
    assert_eq!(result.sample(Category::Evening).unwrap().frame_number, 5);
    assert_eq!(result.sample(Category::Night).unwrap().frame_number, 10);
}

#[test]
fn frame_limit_stops_early() {
    let path = mixed_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let options = ScanOptions::new().with_frame_limit(7);
    let result = scan_file(path, &options).expect("Failed to scan fixture");
    assert_eq!(result.total_frames(), 7);
    assert_eq!(result.count(Category::Day), 5);
    assert_eq!(result.count(Category::Evening), 2);
    assert!(result.sample(Category::Night).is_none());
}

// ── VideoFile and FrameIterator ────────────────────────────────────

#[test]
fn metadata_matches_fixture() {
    let path = bright_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let video = VideoFile::open(path).expect("Failed to open fixture");
    let metadata = video.metadata();
    assert_eq!(metadata.width, 64);
    assert_eq!(metadata.height, 64);
    assert!((metadata.frames_per_second - 10.0).abs() < 0.01);
    assert_eq!(metadata.codec, "h264");
}

#[test]
fn frames_are_numbered_in_order() {
    let path = bright_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut video = VideoFile::open(path).expect("Failed to open fixture");
    let numbers: Vec<u64> = video
        .frames()
        .expect("Failed to create iterator")
        .map(|result| result.expect("Decode error").0)
        .collect();
    assert_eq!(numbers, (0..10).collect::<Vec<u64>>());
}

#[test]
fn frames_are_rgb_at_source_size() {
    let path = dark_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut video = VideoFile::open(path).expect("Failed to open fixture");
    let (_, image) = video
        .frames()
        .expect("Failed to create iterator")
        .next()
        .expect("at least one frame")
        .expect("Decode error");
    assert_eq!(image.dimensions(), (64, 64));
}

#[test]
fn video_can_be_scanned_after_open() {
    let path = bright_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut video = VideoFile::open(path).expect("Failed to open fixture");
    let result = scan_video(&mut video, &ScanOptions::new()).expect("Failed to scan");
    assert_eq!(result.count(Category::Day), result.total_frames());
}
