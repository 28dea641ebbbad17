//! Audio track extraction and playback.
//!
//! Audio runs in its own `ffplay` process, started once next to the render
//! loop. Nothing links the two after start, so long videos can drift.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// How long to wait for ffplay to exit after an interrupt before killing it.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Errors from audio extraction or playback.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// A required media tool is not installed
    #[error("{0} not found. Please install FFmpeg to play audio")]
    ToolNotFound(&'static str),
    /// Failed to spawn the audio process
    #[error("failed to spawn {tool}: {source}")]
    SpawnFailed {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
    /// Audio extraction exited with a failure status
    #[error("audio extraction failed (exit code {exit_code:?}): {stderr}")]
    ExtractionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },
}

fn spawn_error(tool: &'static str, e: std::io::Error) -> AudioError {
    if e.kind() == std::io::ErrorKind::NotFound {
        AudioError::ToolNotFound(tool)
    } else {
        AudioError::SpawnFailed { tool, source: e }
    }
}

/// Fire-and-forget audio playback.
pub trait AudioPlayer {
    /// Start playback. Called once, just before the first frame.
    fn play(&mut self) -> Result<(), AudioError>;

    /// Stop playback. Must be safe to call more than once, or before `play`.
    fn stop(&mut self);
}

/// Player that produces no sound (muted playback or no audio stream).
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop(&mut self) {}
}

/// Plays an audio file through `ffplay` without a display window.
#[derive(Debug)]
pub struct FfplayAudio {
    track: PathBuf,
    child: Option<Child>,
}

impl FfplayAudio {
    pub fn new(track: impl Into<PathBuf>) -> Self {
        Self {
            track: track.into(),
            child: None,
        }
    }

    pub fn track(&self) -> &Path {
        &self.track
    }

    /// Check whether the ffplay process is still running.
    pub fn is_playing(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

impl AudioPlayer for FfplayAudio {
    fn play(&mut self) -> Result<(), AudioError> {
        if self.child.is_some() {
            return Ok(());
        }
        let child = Command::new("ffplay")
            .arg("-nodisp")
            .arg("-autoexit")
            .arg("-loglevel")
            .arg("quiet")
            .arg(&self.track)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error("ffplay", e))?;
        log::info!("Audio playback started (pid {})", child.id());
        self.child = Some(child);
        Ok(())
    }

    /// Send SIGINT to ffplay and wait for it to exit, killing it if it
    /// does not stop within the timeout.
    fn stop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        if !matches!(child.try_wait(), Ok(None)) {
            return;
        }

        #[cfg(unix)]
        {
            unsafe {
                libc::kill(child.id() as i32, libc::SIGINT);
            }
        }

        #[cfg(not(unix))]
        {
            let _ = child.kill();
        }

        let start = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) if start.elapsed() > SHUTDOWN_TIMEOUT => {
                    let _ = child.kill();
                    let _ = child.wait();
                    break;
                }
                Ok(None) => std::thread::sleep(Duration::from_millis(20)),
                Err(_) => break,
            }
        }
        log::info!("Audio playback stopped");
    }
}

impl Drop for FfplayAudio {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Extract the audio track of `video` into an mp3 at `output`.
pub fn extract_audio(video: &Path, output: &Path) -> Result<PathBuf, AudioError> {
    let result = Command::new("ffmpeg")
        .arg("-hide_banner")
        .arg("-loglevel")
        .arg("error")
        .arg("-nostdin")
        .arg("-i")
        .arg(video)
        .arg("-q:a")
        .arg("0")
        .arg("-map")
        .arg("a")
        .arg(output)
        .arg("-y")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error("ffmpeg", e))?;

    if !result.status.success() {
        return Err(AudioError::ExtractionFailed {
            exit_code: result.status.code(),
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }

    log::info!("Extracted audio to {}", output.display());
    Ok(output.to_path_buf())
}
