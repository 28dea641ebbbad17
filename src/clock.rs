//! Playback clock that paces rendering to the source frame rate.

use std::thread;
use std::time::{Duration, Instant};

/// How long to wait before frame `frame_index` is due, given `elapsed`
/// wall-clock time since playback start.
///
/// Returns `None` when the deadline `frame_index / fps` has already passed
/// (or `fps` is not a usable rate).
pub fn frame_delay(frame_index: u64, fps: f64, elapsed: Duration) -> Option<Duration> {
    let target = Duration::try_from_secs_f64(frame_index as f64 / fps).ok()?;
    target.checked_sub(elapsed).filter(|d| !d.is_zero())
}

/// Timing authority converting frame index + native frame rate into a
/// real-time deadline.
///
/// Frames that fall behind schedule are never dropped; `wait_for_frame`
/// simply returns without sleeping, so video can lag audio when rendering
/// is slower than real time.
#[derive(Debug, Default)]
pub struct PlaybackClock {
    start: Option<Instant>,
    frame_count: u64,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current instant as playback start. Only the first call
    /// has any effect.
    pub fn start(&mut self) {
        if self.start.is_none() {
            self.start = Some(Instant::now());
        }
    }

    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// Wall-clock time since [`start`](Self::start), zero before it.
    pub fn elapsed(&self) -> Duration {
        self.start.map(|s| s.elapsed()).unwrap_or_default()
    }

    /// Count one rendered frame and return the new total.
    pub fn record_frame(&mut self) -> u64 {
        self.frame_count += 1;
        self.frame_count
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Block until `start + frame_index / source_fps`, or return
    /// immediately if that time has passed.
    ///
    /// `source_fps` must be positive; callers validate it. Starts the clock
    /// if it was not started yet. Returns the time slept.
    pub fn wait_for_frame(&mut self, frame_index: u64, source_fps: f64) -> Duration {
        self.start();
        match frame_delay(frame_index, source_fps, self.elapsed()) {
            Some(delay) => {
                thread::sleep(delay);
                delay
            }
            None => Duration::ZERO,
        }
    }
}
