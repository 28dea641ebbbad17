//! Subcommand handlers for config actions.

use std::path::{Path, PathBuf};

use super::args::ConfigAction;
use crate::config::{default_path, Config, DEFAULT_CONFIG_TOML};

/// Handle config subcommand actions.
///
/// Returns a user-facing error message on failure.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), String> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(default_path);
    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&config_path)).map_err(|e| e.to_string())?;
            print!("{}", format_config(&config));
            println!();
            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            init_config(&config_path)?;
            println!("Created config file: {}", config_path.display());
            Ok(())
        }
    }
}

/// Human-readable summary of the effective settings.
pub fn format_config(config: &Config) -> String {
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    let mut out = String::from("Current configuration:\n");
    out.push_str(&format!("  Audio: {}\n", yes_no(config.playback.audio)));
    out.push_str(&format!(
        "  Decode width: {}px\n",
        config.playback.decode_width
    ));
    out.push_str(&format!("  Download format: {}\n", config.download.format));
    out.push_str(&format!("  yt-dlp: {}\n", config.download.yt_dlp));
    out.push_str(&format!(
        "  Log level: {}\n",
        config.log.level.as_deref().unwrap_or("warn")
    ));
    if let Some(file) = &config.log.file {
        out.push_str(&format!("  Log file: {}\n", file.display()));
    }
    out
}

/// Write the default config to `path`, refusing to overwrite.
pub fn init_config(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!(
            "Config file already exists: {}\nUse 'termtube config show' to view current settings.",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Error creating config directory: {}", e))?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TOML)
        .map_err(|e| format!("Error writing config file: {}", e))
}
