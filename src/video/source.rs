//! Frame source abstraction consumed by the render loop.

use super::Frame;

/// Errors raised while probing or decoding a video.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A required media tool is not installed
    #[error("{tool} not found. Please install FFmpeg (it provides ffmpeg, ffprobe and ffplay)")]
    ToolNotFound { tool: &'static str },
    /// Failed to spawn the decoder process
    #[error("failed to spawn {tool}: {source}")]
    SpawnFailed {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
    /// ffprobe output could not be used
    #[error("failed to probe video: {0}")]
    Probe(String),
    /// The stream ended in the middle of a frame
    #[error("video stream ended mid-frame ({got} of {expected} bytes)")]
    TruncatedFrame { got: usize, expected: usize },
    /// The decoder exited with a failure status
    #[error("ffmpeg exited with code {exit_code:?}\n{stderr}")]
    ProcessFailed {
        exit_code: Option<i32>,
        stderr: String,
    },
    /// I/O error while reading decoded frames
    #[error("I/O error while decoding: {0}")]
    Io(#[from] std::io::Error),
}

/// Ordered stream of decoded frames.
///
/// The render loop owns its source for the whole playback and calls
/// [`close`](FrameSource::close) on every exit path. Implementations should
/// also release their resources on drop.
pub trait FrameSource {
    /// Decode the next frame. `Ok(None)` marks the end of the stream.
    fn next_frame(&mut self) -> Result<Option<Frame>, DecodeError>;

    /// Native frame rate of the stream in frames per second.
    fn native_frame_rate(&self) -> f64;

    /// Release the decoding resource. Must be safe to call more than once.
    fn close(&mut self) {}
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Result<Option<Frame>, DecodeError> {
        (**self).next_frame()
    }

    fn native_frame_rate(&self) -> f64 {
        (**self).native_frame_rate()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Map a spawn error to [`DecodeError`], treating `NotFound` as a missing tool.
pub(crate) fn spawn_error(tool: &'static str, e: std::io::Error) -> DecodeError {
    if e.kind() == std::io::ErrorKind::NotFound {
        DecodeError::ToolNotFound { tool }
    } else {
        DecodeError::SpawnFailed { tool, source: e }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_error_not_found() {
        let err = spawn_error("ffmpeg", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(matches!(err, DecodeError::ToolNotFound { tool: "ffmpeg" }));
        assert!(err.to_string().contains("ffmpeg not found"));
    }

    #[test]
    fn test_spawn_error_other() {
        let err = spawn_error(
            "ffprobe",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, DecodeError::SpawnFailed { tool: "ffprobe", .. }));
    }

    #[test]
    fn test_process_failed_display() {
        let err = DecodeError::ProcessFailed {
            exit_code: Some(1),
            stderr: "moov atom not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Some(1)"));
        assert!(msg.contains("moov atom not found"));
    }
}
