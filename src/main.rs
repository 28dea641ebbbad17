use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

use termtube::audio::{extract_audio, AudioPlayer, FfplayAudio, SilentAudio};
use termtube::cancel::{install_ctrlc_handler, CancelFlag};
use termtube::cli::{handle_config_action, Args, Command};
use termtube::config::{Config, ConfigError};
use termtube::logging;
use termtube::media::{acquire, Downloader, MediaError, MediaSource, MediaWorkspace};
use termtube::player::{run_playback, PlaybackError, StopReason};
use termtube::terminal::{CrosstermSurface, TerminalSession};
use termtube::video::{DecodeError, FfmpegSource};

/// Errors that end the program before or around playback
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("no video given. Usage: termtube <URL or FILE> (see --help)")]
    MissingSource,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open log file: {0}")]
    Logging(#[source] std::io::Error),
    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("failed to set up terminal: {0}")]
    Terminal(#[source] std::io::Error),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode, AppError> {
    if let Some(Command::Config { action }) = args.command {
        return Ok(match handle_config_action(action, args.config.as_deref()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(msg) => {
                eprintln!("{}", msg);
                ExitCode::FAILURE
            }
        });
    }

    let input = args.source.clone().ok_or(AppError::MissingSource)?;
    let config = Config::load(args.config.as_deref())?;

    let level = logging::level_for(args.verbose, config.log.level.as_deref());
    let log_file = args.log_file.as_deref().or(config.log.file.as_deref());
    logging::init(level, log_file).map_err(AppError::Logging)?;

    let cancel = CancelFlag::new();
    install_ctrlc_handler(&cancel)?;

    let source = MediaSource::parse(&input)?;
    let workspace = MediaWorkspace::new()?.keep_files(args.keep_files);
    let downloader = Downloader {
        program: config.download.yt_dlp.clone(),
        format: config.download.format.clone(),
    };

    if matches!(source, MediaSource::Remote(_)) {
        println!("Downloading video...");
    }
    let video_path = match acquire(&source, &workspace, &downloader) {
        Ok(path) => path,
        Err(_) if cancel.is_cancelled() => {
            println!("{}", StopReason::Canceled);
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => return Err(e.into()),
    };
    if matches!(source, MediaSource::Remote(_)) {
        println!("Download complete. Saved as: {}", video_path.display());
    }

    let decode_width = args.decode_width.unwrap_or(config.playback.decode_width);
    let frames = FfmpegSource::open(&video_path, decode_width)?;

    let want_audio = config.playback.audio && !args.no_audio;
    let mut audio = prepare_audio(&video_path, &workspace, want_audio && frames.info().has_audio);

    if cancel.is_cancelled() {
        println!("{}", StopReason::Canceled);
        return Ok(ExitCode::SUCCESS);
    }

    println!("Starting playback...");
    let outcome = {
        let _session = TerminalSession::enter().map_err(AppError::Terminal)?;
        let mut surface = CrosstermSurface::stdout();
        run_playback(frames, &mut surface, audio.as_mut(), &cancel)
    };
    let result = outcome?;

    if let Some(e) = &result.audio_error {
        log::warn!("Audio unavailable, played without sound: {}", e);
        eprintln!("Warning: {} (played without sound)", e);
    }
    match &result.reason {
        StopReason::DecodeError(_) => eprintln!("{}", result.reason),
        reason => println!("{}", reason),
    }
    log::info!(
        "Rendered {} frame(s) in {:.1?}",
        result.frames_rendered,
        result.elapsed
    );

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Extract the audio track into the workspace and build its player.
/// Any failure falls back to silent playback.
fn prepare_audio(video: &Path, workspace: &MediaWorkspace, enabled: bool) -> Box<dyn AudioPlayer> {
    if !enabled {
        log::info!("Audio disabled or not present, playing silently");
        return Box::new(SilentAudio);
    }

    println!("Extracting audio...");
    match extract_audio(video, &workspace.audio_path()) {
        Ok(track) => {
            println!("Audio extraction complete.");
            Box::new(FfplayAudio::new(track))
        }
        Err(e) => {
            log::warn!("Audio extraction failed: {}", e);
            eprintln!("Warning: {} (playing without sound)", e);
            Box::new(SilentAudio)
        }
    }
}
