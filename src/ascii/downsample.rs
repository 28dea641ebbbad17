//! Box resampling from pixel data to a character grid.

/// Downsample a grayscale image to a character grid.
///
/// Each character cell averages the brightness of the pixels in its source
/// region. When the image is smaller than the grid along an axis, regions
/// are widened to one pixel so every cell samples its nearest source pixel.
///
/// # Arguments
/// * `gray` - Grayscale pixel data (one byte per pixel, row-major order)
/// * `img_width` - Width of the source image in pixels
/// * `img_height` - Height of the source image in pixels
/// * `cols` - Output width in characters
/// * `rows` - Output height in characters
///
/// # Returns
/// `cols * rows` brightness values in row-major order. Cells whose region
/// lies outside `gray` read as 0.
pub fn downsample(gray: &[u8], img_width: u32, img_height: u32, cols: u16, rows: u16) -> Vec<u8> {
    let output_size = cols as usize * rows as usize;
    if output_size == 0 {
        return Vec::new();
    }
    if img_width == 0 || img_height == 0 || gray.is_empty() {
        return vec![0; output_size];
    }

    let x_bounds = cell_bounds(img_width, cols);
    let y_bounds = cell_bounds(img_height, rows);

    let mut result = Vec::with_capacity(output_size);
    for &(start_y, end_y) in &y_bounds {
        for &(start_x, end_x) in &x_bounds {
            let mut sum = 0u64;
            let mut count = 0u64;

            for py in start_y..end_y {
                let row_offset = py as usize * img_width as usize;
                for px in start_x..end_x {
                    if let Some(&value) = gray.get(row_offset + px as usize) {
                        sum += value as u64;
                        count += 1;
                    }
                }
            }

            result.push(if count > 0 { (sum / count) as u8 } else { 0 });
        }
    }

    result
}

/// Source pixel range `[start, end)` for each of `cells` output cells.
///
/// Bounds are integer so the last cell always ends at `pixels`.
fn cell_bounds(pixels: u32, cells: u16) -> Vec<(u32, u32)> {
    let (total, count) = (pixels as u64, cells as u64);
    (0..count)
        .map(|i| {
            let start = (i * total / count).min(total - 1);
            let end = ((i + 1) * total / count).clamp(start + 1, total);
            (start as u32, end as u32)
        })
        .collect()
}
