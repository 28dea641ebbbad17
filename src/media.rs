//! Media acquisition: resolving the input to a local video file.
//!
//! Downloaded videos and extracted audio live in a [`MediaWorkspace`], a
//! temporary directory removed when the workspace is dropped.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Default yt-dlp format selector: best single-file mp4, else best overall.
pub const DEFAULT_FORMAT: &str = "best[ext=mp4]/best";

/// Errors that can occur while acquiring media.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// yt-dlp is not installed
    #[error("{0} not found. Install yt-dlp to play remote videos (e.g. `pip install yt-dlp`)")]
    DownloaderNotFound(String),
    /// yt-dlp exited with a failure status
    #[error("download failed (exit code {exit_code:?})")]
    DownloadFailed { exit_code: Option<i32> },
    /// yt-dlp succeeded but the output file could not be found
    #[error("download finished but no video file was found in {0}")]
    MissingOutput(PathBuf),
    /// Input is neither an existing file nor a URL
    #[error("'{0}' is not an existing file or an http(s) URL")]
    InvalidSource(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the video to play comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Local(PathBuf),
    Remote(String),
}

impl MediaSource {
    /// Classify a command-line input. Existing paths win over URL parsing.
    pub fn parse(input: &str) -> Result<Self, MediaError> {
        let path = Path::new(input);
        if path.is_file() {
            return Ok(MediaSource::Local(path.to_path_buf()));
        }
        if input.starts_with("http://") || input.starts_with("https://") {
            return Ok(MediaSource::Remote(input.to_string()));
        }
        Err(MediaError::InvalidSource(input.to_string()))
    }
}

/// Temporary directory owning every file created for one playback.
pub struct MediaWorkspace {
    dir: Option<TempDir>,
    keep: bool,
}

impl MediaWorkspace {
    /// Create a fresh workspace under the system temp directory.
    pub fn new() -> Result<Self, MediaError> {
        let dir = tempfile::Builder::new().prefix("termtube-").tempdir()?;
        log::debug!("Media workspace at {}", dir.path().display());
        Ok(Self {
            dir: Some(dir),
            keep: false,
        })
    }

    /// Leave the files on disk when the workspace is dropped.
    pub fn keep_files(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.as_ref().map(|d| d.path()).unwrap_or(Path::new("."))
    }

    /// Path for the extracted audio track.
    pub fn audio_path(&self) -> PathBuf {
        self.path().join("audio.mp3")
    }
}

impl Drop for MediaWorkspace {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        if self.keep {
            let kept = dir.keep();
            log::info!("Keeping media files in {}", kept.display());
            return;
        }
        let path = dir.path().to_path_buf();
        match dir.close() {
            Ok(()) => log::info!("Removed media files in {}", path.display()),
            Err(e) => log::warn!("Failed to remove {}: {}", path.display(), e),
        }
    }
}

/// yt-dlp invocation settings.
#[derive(Debug, Clone)]
pub struct Downloader {
    /// yt-dlp executable name or path
    pub program: String,
    /// Format selector passed to `-f`
    pub format: String,
}

impl Default for Downloader {
    fn default() -> Self {
        Self {
            program: "yt-dlp".to_string(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

impl Downloader {
    /// Arguments for downloading `url` into `dir`.
    pub fn args(&self, url: &str, dir: &Path) -> Vec<String> {
        vec![
            "-f".to_string(),
            self.format.clone(),
            "--no-playlist".to_string(),
            "-o".to_string(),
            dir.join("video.%(ext)s").to_string_lossy().into_owned(),
            "--no-simulate".to_string(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
            url.to_string(),
        ]
    }

    /// Download `url` into `dir` and return the saved file path.
    ///
    /// Progress goes to the inherited stderr; the final path is read from
    /// stdout.
    pub fn download(&self, url: &str, dir: &Path) -> Result<PathBuf, MediaError> {
        log::info!("Downloading {} with {}", url, self.program);
        let output = Command::new(&self.program)
            .args(self.args(url, dir))
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    MediaError::DownloaderNotFound(self.program.clone())
                } else {
                    MediaError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(MediaError::DownloadFailed {
                exit_code: output.status.code(),
            });
        }

        let printed = String::from_utf8_lossy(&output.stdout);
        if let Some(path) = printed
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(PathBuf::from)
            .filter(|p| p.is_file())
        {
            return Ok(path);
        }
        find_video_file(dir)?.ok_or_else(|| MediaError::MissingOutput(dir.to_path_buf()))
    }
}

/// Find the `video.*` file in `dir`, if any.
fn find_video_file(dir: &Path) -> Result<Option<PathBuf>, MediaError> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_video = path
            .file_stem()
            .map(|stem| stem == "video")
            .unwrap_or(false);
        if is_video && path.is_file() {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Resolve `source` to a playable local file, downloading if needed.
pub fn acquire(
    source: &MediaSource,
    workspace: &MediaWorkspace,
    downloader: &Downloader,
) -> Result<PathBuf, MediaError> {
    match source {
        MediaSource::Local(path) => Ok(path.clone()),
        MediaSource::Remote(url) => downloader.download(url, workspace.path()),
    }
}
