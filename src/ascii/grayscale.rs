//! RGB to grayscale conversion using ITU-R BT.601 luminance formula.

use std::borrow::Cow;

use crate::video::{Frame, FrameFormat};

/// Convert a frame to one luminance byte per pixel.
///
/// RGB frames use Y = 0.299*R + 0.587*G + 0.114*B with the coefficients
/// scaled by 1000 so the hot path stays in integer math. Gray frames are
/// passed through without copying.
pub fn to_luminance(frame: &Frame) -> Cow<'_, [u8]> {
    match frame.format {
        FrameFormat::Gray => Cow::Borrowed(&frame.data),
        FrameFormat::Rgb => {
            let mut gray = Vec::with_capacity(frame.pixel_count());
            for rgb in frame.data.chunks_exact(3) {
                gray.push(luminance(rgb[0], rgb[1], rgb[2]));
            }
            Cow::Owned(gray)
        }
    }
}

/// BT.601 luminance of a single pixel.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    // 299 + 587 + 114 = 1000
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}
