//! Configuration loading functionality.
//!
//! Resolves the configuration path and reads the coordinate store.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::Config;
use super::validation::validate_config;
use crate::constants::{APP_NAME, CONFIG_FILE_NAME};
use crate::geo::Coordinates;
use crate::utils::private_path;

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
/// Returns an error if already set.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Get the custom configuration directory if one was set.
/// Returns None if using the default directory.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().and_then(|d| d.clone())
}

/// Resolve the path of `limelight.toml`.
///
/// A custom directory wins, then `$XDG_CONFIG_HOME/limelight`, then the
/// platform config directory.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(dir) = get_custom_config_dir() {
        return Ok(dir.join(CONFIG_FILE_NAME));
    }

    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => dirs::config_dir().context("Could not determine config directory")?,
    };

    Ok(base.join(APP_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration from a specific path.
///
/// A missing file is not an error; a file that cannot be read, parsed or
/// validated is.
pub fn load_from_path(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", private_path(path)))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", private_path(path)))?;

    validate_config(&config)
        .with_context(|| format!("Invalid configuration in {}", private_path(path)))?;

    Ok(Some(config))
}

/// Read the stored coordinates.
///
/// Fails when the file does not exist, when no location has been stored, or
/// when the stored values are out of range.
pub fn get_location(path: &Path) -> Result<Coordinates> {
    let config = load_from_path(path)?.with_context(|| {
        format!(
            "No configuration file at {}. Run 'limelight location set <LAT> <LON>' first",
            private_path(path)
        )
    })?;

    config.coordinates()?.with_context(|| {
        format!(
            "Latitude and longitude are not set in {}",
            private_path(path)
        )
    })
}
