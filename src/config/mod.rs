//! Coordinate store for limelight.
//!
//! Persists the chosen location so repeated queries do not need it on the
//! command line (or a fresh geocoding lookup). The store is a small TOML file:
//!
//! ```toml
//! #[Location]
//! latitude = 37.7749    # Geographic latitude (-90 to 90)
//! longitude = -122.4194 # Geographic longitude (-180 to 180)
//!
//! #[Presentation]
//! timezone = "America/Los_Angeles" # IANA timezone for displayed times
//! ```
//!
//! ## Configuration Sources
//!
//! 1. The directory passed with `--config` (see [`set_config_dir`])
//! 2. **XDG_CONFIG_HOME**/limelight/limelight.toml
//! 3. The platform configuration directory reported by `dirs`
//!
//! All fields are optional. Coordinates must be set together, and every value
//! is validated on load and before save so an invalid location can never be
//! handed to the solar calculator from here.

pub mod builder;
pub mod loading;
pub mod validation;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

// Re-export public API
pub use builder::{save_to_path, update_coordinates, update_timezone};
pub use loading::{
    get_config_path, get_custom_config_dir, get_location, load_from_path, set_config_dir,
};

/// Persisted settings.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Geographic latitude in degrees (-90 to +90)
    pub latitude: Option<f64>,
    /// Geographic longitude in degrees (-180 to +180)
    pub longitude: Option<f64>,
    /// IANA timezone name used to present results.
    ///
    /// When absent, results are shown in the timezone of the stored
    /// coordinates.
    pub timezone: Option<String>,
}

impl Config {
    /// Validated coordinates, or `None` when the location has not been set.
    pub fn coordinates(&self) -> Result<Option<Coordinates>> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Ok(Some(Coordinates::new(lat, lon)?)),
            (None, None) => Ok(None),
            _ => anyhow::bail!("latitude and longitude must be set together"),
        }
    }

    /// Parsed presentation timezone, or `None` when not configured.
    pub fn timezone(&self) -> Result<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|e| anyhow::anyhow!("{e}"))
                    .with_context(|| format!("Unknown timezone '{name}'"))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests;
