//! Place-name resolution boundary.
//!
//! limelight does not ship a geocoder. Anything that can turn a place name
//! into coordinates (an HTTP client for a geocoding service, an offline city
//! table) plugs in through [`Geocoder`], and [`set_location_by_place`] stores
//! the answer in the coordinate store.

use anyhow::{Context, Result};
use std::path::Path;

use super::coordinates::Coordinates;

/// A resolved place.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodingResult {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeocodingResult {
    /// Validated coordinates of the result.
    pub fn coordinates(&self) -> Result<Coordinates> {
        Coordinates::new(self.latitude, self.longitude)
            .with_context(|| format!("Geocoder returned invalid coordinates for {}", self.display_name))
    }
}

/// Resolves a place name to coordinates.
///
/// Implementations should fail when nothing matches rather than return a
/// default location.
#[cfg_attr(test, mockall::automock)]
pub trait Geocoder {
    fn geocode(&self, place: &str) -> Result<GeocodingResult>;
}

/// Resolve `place` and store its coordinates in the config at `config_path`.
pub fn set_location_by_place(
    geocoder: &dyn Geocoder,
    config_path: &Path,
    place: &str,
) -> Result<GeocodingResult> {
    let place = place.trim();
    if place.is_empty() {
        anyhow::bail!("Place name cannot be empty");
    }

    let result = geocoder
        .geocode(place)
        .with_context(|| format!("Failed to geocode place: {place}"))?;

    let coordinates = result.coordinates()?;
    crate::config::update_coordinates(config_path, coordinates)
        .context("Failed to save location to config")?;

    Ok(result)
}
