//! Unit tests for the ASCII rasterizer.
//!
//! These tests verify:
//! - Quantizer ordering over the full intensity range
//! - Grid dimensions for arbitrary sizes
//! - Determinism
//! - Rejection of zero-area grids

use termtube::ascii::*;
use termtube::video::Frame;

fn gradient_frame(width: u32, height: u32) -> Frame {
    let data = (0..width * height)
        .map(|i| ((i * 255) / (width * height - 1).max(1)) as u8)
        .collect();
    Frame::gray(width, height, data)
}

// ==================== Quantizer Tests ====================

#[test]
fn test_quantizer_index_non_decreasing() {
    let levels = DENSITY_PALETTE.len();
    let mut prev = 0;
    for i in 0..=255u8 {
        let idx = glyph_index(i, levels);
        assert!(idx >= prev, "index dropped at intensity {}", i);
        assert!(idx < levels);
        prev = idx;
    }
    assert_eq!(glyph_index(0, levels), 0);
    assert_eq!(glyph_index(255, levels), levels - 1);
}

#[test]
fn test_quantizer_uses_every_glyph() {
    let mut seen: Vec<char> = (0..=255u8).map(quantize).collect();
    seen.dedup();
    assert_eq!(seen, DENSITY_PALETTE.to_vec());
}

#[test]
fn test_quantizer_example_values() {
    assert_eq!(quantize(0), '@');
    assert_eq!(quantize(128), '*');
    assert_eq!(quantize(200), ':');
    assert_eq!(quantize(255), '.');
}

// ==================== Rasterizer Tests ====================

#[test]
fn test_rasterize_two_by_two_example() {
    let frame = Frame::gray(2, 2, vec![0, 128, 200, 255]);
    let grid = rasterize(&frame, 2, 2).unwrap();
    assert_eq!(grid.chars(), &['@', '*', ':', '.']);
    assert_eq!(grid.to_string_display(), "@*\n:.");
}

#[test]
fn test_rasterize_exact_dimensions() {
    let frame = gradient_frame(64, 36);
    for &(cols, rows) in &[(1u16, 1u16), (1, 50), (80, 1), (79, 23), (200, 60), (64, 36)] {
        let grid = rasterize(&frame, cols, rows).unwrap();
        assert_eq!(grid.cols(), cols);
        assert_eq!(grid.rows(), rows);
        let text = grid.to_string_display();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), rows as usize);
        for line in lines {
            assert_eq!(line.chars().count(), cols as usize);
        }
    }
}

#[test]
fn test_rasterize_is_deterministic() {
    let frame = gradient_frame(97, 41);
    let first = rasterize(&frame, 33, 17).unwrap();
    for _ in 0..5 {
        assert_eq!(rasterize(&frame, 33, 17).unwrap(), first);
    }
}

#[test]
fn test_rasterize_zero_dimensions_fail() {
    let frame = gradient_frame(8, 8);
    assert_eq!(
        rasterize(&frame, 0, 10),
        Err(RasterError::InvalidDimensions { cols: 0, rows: 10 })
    );
    assert_eq!(
        rasterize(&frame, 10, 0),
        Err(RasterError::InvalidDimensions { cols: 10, rows: 0 })
    );
    assert!(rasterize(&frame, 0, 0).is_err());
}

#[test]
fn test_rasterize_rgb_matches_gray_equivalent() {
    // Pure green has BT.601 luminance 149
    let rgb = Frame::rgb(1, 1, vec![0, 255, 0]);
    let gray = Frame::gray(1, 1, vec![149]);
    assert_eq!(
        rasterize(&rgb, 3, 2).unwrap(),
        rasterize(&gray, 3, 2).unwrap()
    );
}

#[test]
fn test_rasterize_uses_perceptual_weights() {
    // Naive averaging would make red and blue identical; BT.601 does not
    let red = Frame::rgb(1, 1, vec![255, 0, 0]);
    let blue = Frame::rgb(1, 1, vec![0, 0, 255]);
    let red_char = rasterize(&red, 1, 1).unwrap().chars()[0];
    let blue_char = rasterize(&blue, 1, 1).unwrap().chars()[0];
    assert_eq!(red_char, quantize(76));
    assert_eq!(blue_char, quantize(29));
    assert_ne!(red_char, blue_char);
}

#[test]
fn test_rasterize_downsamples_halves() {
    // Left half black, right half white
    let mut data = Vec::new();
    for _ in 0..4 {
        data.extend_from_slice(&[0, 0, 0, 0, 255, 255, 255, 255]);
    }
    let frame = Frame::gray(8, 4, data);
    let grid = rasterize(&frame, 2, 1).unwrap();
    assert_eq!(grid.to_string_display(), "@.");
}

#[test]
fn test_downsample_then_quantize_matches_rasterize() {
    let frame = gradient_frame(40, 20);
    let brightness = downsample(&frame.data, frame.width, frame.height, 10, 5);
    let expected: Vec<char> = brightness.into_iter().map(quantize).collect();
    assert_eq!(rasterize(&frame, 10, 5).unwrap().chars(), expected.as_slice());
}
