//! `limelight location`: show or change the stored location.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::path::Path;

use crate::config;
use crate::geo::{Coordinates, determine_timezone_from_coordinates};
use crate::utils::private_path;

/// Print the stored location and the timezone results are shown in.
pub fn handle_show_command(config_path: &Path) -> Result<()> {
    let coordinates = config::get_location(config_path)?;
    let stored_tz = config::load_from_path(config_path)?
        .map(|c| c.timezone())
        .transpose()?
        .flatten();

    log_version!();
    log_block_start!("Location from {}", private_path(config_path));
    log_indented!("{coordinates}");
    match stored_tz {
        Some(tz) => log_indented!("Timezone: {} (configured)", tz.name()),
        None => log_indented!(
            "Timezone: {} (from coordinates)",
            determine_timezone_from_coordinates(coordinates.latitude(), coordinates.longitude())
                .name()
        ),
    }
    log_end!();
    Ok(())
}

/// Store a new location, keeping the configured timezone.
pub fn handle_set_command(config_path: &Path, latitude: f64, longitude: f64) -> Result<()> {
    let coordinates = Coordinates::new(latitude, longitude).context("Cannot store location")?;

    log_version!();
    config::update_coordinates(config_path, coordinates)?;

    let detected = determine_timezone_from_coordinates(latitude, longitude);
    log_indented!("Detected timezone: {}", detected.name());
    log_end!();
    Ok(())
}

/// Store (or with `None`, clear) the presentation timezone.
pub fn handle_timezone_command(config_path: &Path, timezone: Option<Tz>) -> Result<()> {
    log_version!();
    config::update_timezone(config_path, timezone)?;
    log_end!();
    Ok(())
}
