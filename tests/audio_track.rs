//! End-to-end tests for audio detection, extraction and playback.
//!
//! Clips are generated with FFmpeg's lavfi sources. Tests skip when the
//! needed tools or the mp3 encoder are not installed.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use termtube::audio::{extract_audio, AudioError, AudioPlayer, FfplayAudio};
use termtube::video::probe;

fn tool_available(tool: &str) -> bool {
    Command::new(tool)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn ffmpeg_available() -> bool {
    tool_available("ffmpeg") && tool_available("ffprobe")
}

/// Extraction writes mp3, which needs an mp3 encoder in the FFmpeg build.
fn mp3_encoder_available() -> bool {
    Command::new("ffmpeg")
        .args(["-hide_banner", "-encoders"])
        .stderr(Stdio::null())
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).contains("libmp3lame"))
        .unwrap_or(false)
}

fn generate(dir: &Path, name: &str, with_audio: bool) -> PathBuf {
    let path = dir.join(name);
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-hide_banner", "-loglevel", "error"])
        .args(["-f", "lavfi", "-i", "testsrc=size=64x48:rate=10:duration=1"]);
    if with_audio {
        cmd.args(["-f", "lavfi", "-i", "sine=frequency=440:duration=1"])
            .args(["-c:a", "aac", "-shortest"]);
    }
    let status = cmd
        .args(["-pix_fmt", "yuv420p", "-y"])
        .arg(&path)
        .status()
        .expect("ffmpeg should run");
    assert!(status.success(), "failed to generate {}", name);
    path
}

#[test]
fn test_probe_detects_audio_stream() {
    if !ffmpeg_available() {
        println!("SKIP: ffmpeg not available");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let with_sound = generate(dir.path(), "sound.mp4", true);
    let silent = generate(dir.path(), "silent.mp4", false);

    assert!(probe(&with_sound).unwrap().has_audio);
    assert!(!probe(&silent).unwrap().has_audio);
}

#[test]
fn test_extract_audio_writes_mp3() {
    if !ffmpeg_available() || !mp3_encoder_available() {
        println!("SKIP: ffmpeg with mp3 encoder not available");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let clip = generate(dir.path(), "sound.mp4", true);
    let output = dir.path().join("audio.mp3");

    let track = extract_audio(&clip, &output).unwrap();

    assert_eq!(track, output);
    let size = std::fs::metadata(&track).unwrap().len();
    assert!(size > 0, "extracted track is empty");
}

#[test]
fn test_extract_audio_from_video_only_fails() {
    if !ffmpeg_available() {
        println!("SKIP: ffmpeg not available");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let clip = generate(dir.path(), "silent.mp4", false);

    let err = extract_audio(&clip, &dir.path().join("audio.mp3")).unwrap_err();

    match err {
        AudioError::ExtractionFailed { exit_code, .. } => assert_ne!(exit_code, Some(0)),
        other => panic!("expected ExtractionFailed, got {:?}", other),
    }
}

#[test]
fn test_ffplay_play_then_stop() {
    if !ffmpeg_available() || !tool_available("ffplay") || !mp3_encoder_available() {
        println!("SKIP: ffplay not available");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let clip = generate(dir.path(), "sound.mp4", true);
    let track = extract_audio(&clip, &dir.path().join("audio.mp3")).unwrap();

    let mut audio = FfplayAudio::new(&track);
    audio.play().unwrap();
    // A second play while running is a no-op
    audio.play().unwrap();

    // ffplay may exit on its own without an audio device; stop handles both
    audio.stop();
    assert!(!audio.is_playing());
    audio.stop();
}
