//! Benchmarks for frame classification and scanning.
//!
//! Run with: cargo bench
//!
//! The file-based benchmark requires fixture files from
//! `tests/fixtures/generate_fixtures.sh`.

use std::{hint::black_box, path::Path};

use criterion::{Criterion, criterion_group, criterion_main};
use daypart::{FfmpegLogLevel, ScanOptions};
use image::{Rgb, RgbImage};

const MIXED_VIDEO: &str = "tests/fixtures/mixed.mp4";

fn gradient_frame(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

fn benchmark_categorize(criterion: &mut Criterion) {
    let frame_720p = gradient_frame(1280, 720);
    let frame_1080p = gradient_frame(1920, 1080);

    criterion.bench_function("categorize 1280x720", |bencher| {
        bencher.iter(|| daypart::categorize(black_box(&frame_720p)));
    });
    criterion.bench_function("categorize 1920x1080", |bencher| {
        bencher.iter(|| daypart::categorize(black_box(&frame_1080p)));
    });
}

fn benchmark_scan_file(criterion: &mut Criterion) {
    daypart::set_ffmpeg_log_level(FfmpegLogLevel::Error);

    if !Path::new(MIXED_VIDEO).exists() {
        eprintln!("Skipping benchmark: fixture not found");
        return;
    }

    criterion.bench_function("scan mixed fixture", |bencher| {
        bencher.iter(|| daypart::scan_file(MIXED_VIDEO, &ScanOptions::new()).unwrap());
    });
}

criterion_group!(benches, benchmark_categorize, benchmark_scan_file);
criterion_main!(benches);
