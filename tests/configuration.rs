//! ScanOptions builder tests.

use daypart::{CancellationToken, ScanOptions};

#[test]
fn options_defaults() {
    let options = ScanOptions::new();
    let debug = format!("{options:?}");
    assert!(debug.contains("ScanOptions"));
    assert!(debug.contains("has_cancellation: false"));
    assert!(debug.contains("batch_size: 1"));
    assert!(debug.contains("frame_limit: None"));
    assert!(debug.contains("strict_open: false"));
}

#[test]
fn options_with_batch_size_clamps_zero() {
    let options = ScanOptions::new().with_batch_size(0);
    assert!(format!("{options:?}").contains("batch_size: 1"));
}

#[test]
fn options_builder_chain() {
    let options = ScanOptions::default()
        .with_cancellation(CancellationToken::new())
        .with_batch_size(50)
        .with_frame_limit(120)
        .with_strict_open(true);
    let debug = format!("{options:?}");
    assert!(debug.contains("has_cancellation: true"));
    assert!(debug.contains("batch_size: 50"));
    assert!(debug.contains("frame_limit: Some(120)"));
    assert!(debug.contains("strict_open: true"));
}
