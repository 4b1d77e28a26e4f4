use std::str::FromStr;

use color_eyre::eyre::{Result, eyre};
use tracing::Level;

use crate::config::LoggingConfig;

pub const DEFAULT_LEVEL: Level = Level::WARN;

pub fn parse_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim()).map_err(|_| eyre!("unknown log level `{level}`"))
}

/// Install the global subscriber. Events go to stderr so stdout stays clean
/// for reports.
///
/// An unknown level falls back to `warn`, the same way a broken config file
/// falls back to defaults, and is reported once the subscriber is up.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let parsed = parse_level(&config.level);
    let level = parsed.as_ref().copied().unwrap_or(DEFAULT_LEVEL);
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.with_ansi(false).json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;

    if let Err(err) = parsed {
        tracing::warn!("{err}, using `{DEFAULT_LEVEL}`");
    }
    Ok(())
}
