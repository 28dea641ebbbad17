//! Configuration file handling for termtube.
//!
//! Loads configuration from `<config dir>/termtube/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::media::DEFAULT_FORMAT;

/// Default width frames are decoded at before rasterization.
pub const DEFAULT_DECODE_WIDTH: u32 = 320;

/// Configuration file structure for termtube.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    #[serde(default = "default_true")]
    pub audio: bool,
    #[serde(default = "default_decode_width")]
    pub decode_width: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            audio: true,
            decode_width: DEFAULT_DECODE_WIDTH,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct DownloadConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_yt_dlp")]
    pub yt_dlp: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            yt_dlp: default_yt_dlp(),
        }
    }
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct LogConfig {
    /// One of error, warn, info, debug, trace
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_decode_width() -> u32 {
    DEFAULT_DECODE_WIDTH
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_yt_dlp() -> String {
    "yt-dlp".to_string()
}

/// Commented config written by `termtube config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# termtube configuration

[playback]
# Play the audio track alongside the video
audio = true
# Frames wider than this are scaled down before rendering (pixels)
decode_width = 320

[download]
# yt-dlp format selector
format = "best[ext=mp4]/best"
# yt-dlp executable
yt_dlp = "yt-dlp"

[log]
# error, warn, info, debug or trace
# level = "warn"
# Write logs to a file instead of stderr
# file = "/tmp/termtube.log"
"#;

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("termtube").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/termtube/config.toml")
        })
}
