//! ASCII rasterizer for converting decoded video frames to glyph grids.
//!
//! The pipeline has three steps:
//!
//! 1. **Grayscale conversion** - RGB to luminance using BT.601
//! 2. **Downsampling** - box resampling to the character grid
//! 3. **Quantization** - map each cell's brightness to a density glyph

mod charset;
mod downsample;
mod grayscale;
mod grid;

pub use charset::{glyph_index, quantize, DENSITY_PALETTE};
pub use downsample::downsample;
pub use grayscale::{luminance, to_luminance};
pub use grid::GlyphGrid;

use crate::video::Frame;

/// Errors produced by [`rasterize`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    /// Asked for a grid with no area
    #[error("invalid grid dimensions {cols}x{rows}: both must be at least 1")]
    InvalidDimensions { cols: u16, rows: u16 },
}

/// Rasterize a frame into a `cols` x `rows` glyph grid.
///
/// Output is deterministic for identical input.
pub fn rasterize(frame: &Frame, cols: u16, rows: u16) -> Result<GlyphGrid, RasterError> {
    if cols == 0 || rows == 0 {
        return Err(RasterError::InvalidDimensions { cols, rows });
    }

    let gray = to_luminance(frame);
    let brightness = downsample(&gray, frame.width, frame.height, cols, rows);
    let chars = brightness.into_iter().map(quantize).collect();

    Ok(GlyphGrid::from_chars(chars, cols, rows))
}
