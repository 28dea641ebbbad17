//! Video decoding: frame types, the frame source trait, and the FFmpeg
//! backed implementation.

mod ffmpeg;
mod frame;
mod probe;
mod source;

pub use ffmpeg::{decode_size, FfmpegSource};
pub use frame::{Frame, FrameFormat};
pub use probe::{parse_probe_output, probe, VideoInfo};
pub use source::{DecodeError, FrameSource};
