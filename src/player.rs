//! Render loop: decode, rasterize, draw and pace one frame per iteration.
//!
//! The loop is single-threaded. Each iteration runs to completion before
//! the cancel flag is polled, so cancellation latency is bounded by one
//! decode + draw + sleep.

use std::fmt;
use std::io;
use std::time::Duration;

use crate::ascii::{rasterize, RasterError};
use crate::audio::{AudioError, AudioPlayer};
use crate::cancel::CancelFlag;
use crate::clock::PlaybackClock;
use crate::terminal::Surface;
use crate::video::{DecodeError, FrameSource};

/// Smallest terminal dimension that still leaves a one-cell margin.
pub const MIN_TERMINAL_SIZE: u16 = 2;

/// Why playback stopped.
#[derive(Debug)]
pub enum StopReason {
    /// The source ran out of frames
    EndOfStream,
    /// The terminal shrank below [`MIN_TERMINAL_SIZE`] in either direction
    TerminalTooSmall { cols: u16, rows: u16 },
    /// The cancel flag was set
    Canceled,
    /// The frame source failed to decode
    DecodeError(DecodeError),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndOfStream => write!(f, "Playback finished."),
            StopReason::TerminalTooSmall { cols, rows } => write!(
                f,
                "Terminal is too small to play video ({}x{}). Enlarge the window and try again.",
                cols, rows
            ),
            StopReason::Canceled => write!(f, "Playback interrupted."),
            StopReason::DecodeError(e) => write!(f, "Playback stopped: {}", e),
        }
    }
}

/// Outcome of [`run_playback`].
#[derive(Debug)]
pub struct PlaybackResult {
    pub reason: StopReason,
    /// Frames drawn to the terminal
    pub frames_rendered: u64,
    /// Wall-clock time since the first frame
    pub elapsed: Duration,
    /// Why audio could not start, if it failed. Reported by the caller once
    /// the terminal is restored.
    pub audio_error: Option<AudioError>,
}

impl PlaybackResult {
    /// Whether playback ended without a decode failure.
    pub fn is_success(&self) -> bool {
        !matches!(self.reason, StopReason::DecodeError(_))
    }
}

/// Errors that abort playback outright.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// The source reported a zero, negative or unknown frame rate
    #[error("invalid frame rate {0}: the video must report a positive frame rate")]
    InvalidFrameRate(f64),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Play `source` on `surface` until it ends, fails, or is canceled.
///
/// The source's frame rate is validated before anything starts. Audio is
/// started once right before the first frame; a failure to start it is
/// returned in [`PlaybackResult::audio_error`] and playback continues
/// silently. On every return path audio is stopped and then the source is
/// closed.
///
/// Nothing is logged at warn level or above while the loop owns the
/// terminal.
pub fn run_playback<S, T, A>(
    mut source: S,
    surface: &mut T,
    audio: &mut A,
    cancel: &CancelFlag,
) -> Result<PlaybackResult, PlaybackError>
where
    S: FrameSource,
    T: Surface + ?Sized,
    A: AudioPlayer + ?Sized,
{
    let fps = source.native_frame_rate();
    if !(fps.is_finite() && fps > 0.0) {
        audio.stop();
        source.close();
        return Err(PlaybackError::InvalidFrameRate(fps));
    }

    let audio_error = audio.play().err();

    let mut clock = PlaybackClock::new();
    let outcome = render_frames(&mut source, surface, &mut clock, fps, cancel);

    audio.stop();
    source.close();

    Ok(PlaybackResult {
        reason: outcome?,
        frames_rendered: clock.frame_count(),
        elapsed: clock.elapsed(),
        audio_error,
    })
}

fn render_frames<S, T>(
    source: &mut S,
    surface: &mut T,
    clock: &mut PlaybackClock,
    fps: f64,
    cancel: &CancelFlag,
) -> Result<StopReason, PlaybackError>
where
    S: FrameSource,
    T: Surface + ?Sized,
{
    if cancel.is_cancelled() {
        return Ok(StopReason::Canceled);
    }

    loop {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return Ok(StopReason::EndOfStream),
            Err(e) => return Ok(StopReason::DecodeError(e)),
        };
        clock.start();

        let (cols, rows) = surface.dimensions()?;
        if cols < MIN_TERMINAL_SIZE || rows < MIN_TERMINAL_SIZE {
            return Ok(StopReason::TerminalTooSmall { cols, rows });
        }

        // One-cell margin keeps the cursor from wrapping on the last cell
        let grid = rasterize(&frame, cols - 1, rows - 1)?;
        drop(frame);
        surface.clear_and_draw(&grid.to_string_display())?;

        let index = clock.record_frame();
        let slept = clock.wait_for_frame(index, fps);
        log::trace!("frame {} drawn at {}x{}, slept {:?}", index, cols, rows, slept);

        if surface.interrupt_requested()? {
            cancel.cancel();
        }
        if cancel.is_cancelled() {
            return Ok(StopReason::Canceled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_messages() {
        assert_eq!(StopReason::EndOfStream.to_string(), "Playback finished.");
        let small = StopReason::TerminalTooSmall { cols: 1, rows: 40 }.to_string();
        assert!(small.contains("too small"));
        assert!(small.contains("1x40"));
        assert_eq!(StopReason::Canceled.to_string(), "Playback interrupted.");
    }

    #[test]
    fn test_decode_error_is_not_success() {
        let result = PlaybackResult {
            reason: StopReason::DecodeError(DecodeError::TruncatedFrame {
                got: 1,
                expected: 3,
            }),
            frames_rendered: 0,
            elapsed: Duration::ZERO,
            audio_error: None,
        };
        assert!(!result.is_success());
    }

    #[test]
    fn test_invalid_frame_rate_message() {
        let err = PlaybackError::InvalidFrameRate(0.0);
        assert!(err.to_string().contains("invalid frame rate 0"));
    }
}
