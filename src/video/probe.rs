//! Stream metadata via `ffprobe`.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use super::source::{spawn_error, DecodeError};

/// Format of the first video stream in a file.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    /// Video width in pixels.
    pub width: u32,
    /// Video height in pixels.
    pub height: u32,
    /// Native frame rate. Zero when ffprobe did not report a usable rate;
    /// the render loop rejects that before playback starts.
    pub fps: f64,
    /// Whether the file also carries an audio stream.
    pub has_audio: bool,
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    #[serde(default)]
    codec_type: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    r_frame_rate: Option<String>,
    #[serde(default)]
    avg_frame_rate: Option<String>,
}

/// Run ffprobe on `path` and return its video stream info.
pub fn probe(path: &Path) -> Result<VideoInfo, DecodeError> {
    let output = Command::new("ffprobe")
        .arg("-v")
        .arg("error")
        .arg("-show_streams")
        .arg("-print_format")
        .arg("json")
        .arg(path)
        .output()
        .map_err(|e| spawn_error("ffprobe", e))?;

    if !output.status.success() {
        return Err(DecodeError::Probe(format!(
            "ffprobe failed for {} ({}): {}",
            path.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    parse_probe_output(&output.stdout)
}

/// Parse ffprobe's `-print_format json -show_streams` output.
pub fn parse_probe_output(json: &[u8]) -> Result<VideoInfo, DecodeError> {
    let parsed: FfprobeOutput = serde_json::from_slice(json)
        .map_err(|e| DecodeError::Probe(format!("invalid ffprobe JSON: {}", e)))?;

    let has_audio = parsed
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| DecodeError::Probe("no video stream found".to_string()))?;

    let (width, height) = match (stream.width, stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(DecodeError::Probe(
                "video stream has no dimensions".to_string(),
            ))
        }
    };

    let fps = stream
        .r_frame_rate
        .as_deref()
        .and_then(parse_rate)
        .or_else(|| stream.avg_frame_rate.as_deref().and_then(parse_rate))
        .unwrap_or(0.0);

    Ok(VideoInfo {
        width,
        height,
        fps,
        has_audio,
    })
}

/// Parse an ffprobe rate such as `30000/1001` or `25`.
fn parse_rate(raw: &str) -> Option<f64> {
    let value = raw.trim();
    let rate = match value.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<f64>().ok()?;
            let den = den.trim().parse::<f64>().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => value.parse::<f64>().ok()?,
    };
    (rate.is_finite() && rate > 0.0).then_some(rate)
}
