//! Character grid produced by the rasterizer.

/// Character-grid representation of a frame, ready to draw.
///
/// Characters are stored row-major; `chars.len() == cols * rows` always
/// holds because the grid can only be built through [`GlyphGrid::from_chars`]
/// by the rasterizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    chars: Vec<char>,
    cols: u16,
    rows: u16,
}

impl GlyphGrid {
    pub(crate) fn from_chars(chars: Vec<char>, cols: u16, rows: u16) -> Self {
        debug_assert_eq!(chars.len(), cols as usize * rows as usize);
        Self { chars, cols, rows }
    }

    /// Width in characters
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Height in characters
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// All characters in row-major order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Iterate over rows as character slices.
    pub fn lines(&self) -> impl Iterator<Item = &[char]> {
        self.chars.chunks(self.cols.max(1) as usize)
    }

    /// Get the character at (col, row), if in range.
    pub fn get(&self, col: u16, row: u16) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.chars
            .get(row as usize * self.cols as usize + col as usize)
            .copied()
    }

    /// Convert the grid to a string for drawing.
    ///
    /// Each row is joined by newlines, no trailing newline.
    pub fn to_string_display(&self) -> String {
        let mut out = String::with_capacity(self.chars.len() + self.rows as usize);
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(line.iter());
        }
        out
    }
}
