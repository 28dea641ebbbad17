//! Decoded video frame types.

/// Pixel layout of a decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// Single luminance channel (1 byte per pixel)
    Gray,
    /// RGB format (3 bytes per pixel)
    Rgb,
}

impl FrameFormat {
    /// Get the number of bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            FrameFormat::Gray => 1,
            FrameFormat::Rgb => 3,
        }
    }
}

/// One decoded image from the video stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Raw pixel data, row-major
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: FrameFormat,
}

impl Frame {
    /// Create a single-channel frame from intensity values.
    pub fn gray(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            data,
            width,
            height,
            format: FrameFormat::Gray,
        }
    }

    /// Create an RGB frame from packed R,G,B triplets.
    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            data,
            width,
            height,
            format: FrameFormat::Rgb,
        }
    }

    /// Number of bytes a frame of this size and format occupies.
    pub fn byte_len(width: u32, height: u32, format: FrameFormat) -> usize {
        width as usize * height as usize * format.bytes_per_pixel()
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_len_by_format() {
        assert_eq!(Frame::byte_len(4, 3, FrameFormat::Gray), 12);
        assert_eq!(Frame::byte_len(4, 3, FrameFormat::Rgb), 36);
    }

    #[test]
    fn test_constructors_set_format() {
        assert_eq!(Frame::gray(1, 1, vec![0]).format, FrameFormat::Gray);
        assert_eq!(Frame::rgb(1, 1, vec![0, 0, 0]).format, FrameFormat::Rgb);
        assert_eq!(Frame::rgb(2, 5, vec![0; 30]).pixel_count(), 10);
    }
}
