//! Density palette and the luminance quantizer.

/// Density ramp (11 levels).
/// Characters ordered from most visually dense (`@`) to least (`.`), so dark
/// pixels draw heavy glyphs.
pub const DENSITY_PALETTE: &[char] = &['@', '#', 'S', '%', '?', '*', '+', ';', ':', ',', '.'];

/// Map an intensity (0-255) to a glyph index in a palette of `levels` entries.
///
/// The index is `floor(intensity / (256 / levels))`, computed with integer
/// math as `intensity * levels / 256` and clamped to the last index.
#[inline]
pub fn glyph_index(intensity: u8, levels: usize) -> usize {
    if levels == 0 {
        return 0;
    }
    ((intensity as usize * levels) / 256).min(levels - 1)
}

/// Quantize an intensity to a glyph from [`DENSITY_PALETTE`].
#[inline]
pub fn quantize(intensity: u8) -> char {
    DENSITY_PALETTE[glyph_index(intensity, DENSITY_PALETTE.len())]
}
