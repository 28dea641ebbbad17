//! Log sink setup.
//!
//! Call sites use the `log` macros; the fmt subscriber installed here picks
//! those records up through its `log` bridge.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;

/// Pick the log level: each `-v` raises it from the default `warn`, and
/// otherwise the configured level is used.
pub fn level_for(verbosity: u8, configured: Option<&str>) -> LevelFilter {
    match verbosity {
        0 => configured
            .and_then(|s| s.trim().parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::WARN),
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber, writing to `file` (appending) or stderr.
pub fn init(level: LevelFilter, file: Option<&Path>) -> std::io::Result<()> {
    let result = match file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    // A subscriber already installed (e.g. by a test harness) is fine
    if let Err(e) = result {
        eprintln!("termtube: logging already initialized: {}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_overrides_config() {
        assert_eq!(level_for(1, Some("error")), LevelFilter::INFO);
        assert_eq!(level_for(2, None), LevelFilter::DEBUG);
        assert_eq!(level_for(7, None), LevelFilter::TRACE);
    }

    #[test]
    fn test_configured_level() {
        assert_eq!(level_for(0, Some("debug")), LevelFilter::DEBUG);
        assert_eq!(level_for(0, Some(" info ")), LevelFilter::INFO);
    }

    #[test]
    fn test_default_and_invalid_level() {
        assert_eq!(level_for(0, None), LevelFilter::WARN);
        assert_eq!(level_for(0, Some("loud")), LevelFilter::WARN);
    }
}
