//! CLI command implementations

pub mod config;
pub mod luma;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use lumguard_core::{Config, ConfigError};

/// Loads a configuration file without writing it back.
///
/// A missing file yields defaults; anything else unreadable is an error.
pub fn read_config(path: &Path) -> Result<Config> {
    match Config::from_file(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            Ok(Config::default())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to load: {}", path.display())),
    }
}

/// Formats a gain as a percentage.
pub fn percent(gain: f32) -> String {
    format!("{:.1}%", gain * 100.0)
}
