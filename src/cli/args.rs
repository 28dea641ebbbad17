//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Play videos as ASCII art with audio in the terminal
#[derive(Parser, Debug)]
#[command(name = "termtube")]
#[command(version, about = "Play videos as ASCII art with audio in the terminal", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Video URL (downloaded with yt-dlp) or local file path
    pub source: Option<String>,

    /// Play without sound
    #[arg(long)]
    pub no_audio: bool,

    /// Scale frames wider than this many pixels down before rendering
    #[arg(long, value_parser = parse_decode_width)]
    pub decode_width: Option<u32>,

    /// Keep downloaded and extracted media files after playback
    #[arg(long)]
    pub keep_files: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr (keeps -v output off the video)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Parse and validate decode width (16-7680 pixels)
fn parse_decode_width(s: &str) -> Result<u32, String> {
    let width: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid width", s))?;
    if !(16..=7680).contains(&width) {
        return Err(format!(
            "Decode width must be between 16 and 7680 pixels, got {}",
            width
        ));
    }
    Ok(width)
}
