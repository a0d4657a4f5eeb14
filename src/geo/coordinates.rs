//! Validated geographic coordinates.
//!
//! Every entry point that accepts a latitude/longitude pair goes through
//! [`Coordinates::new`], so a bad coordinate is rejected once, at the
//! boundary, and never reaches the solar pipeline.

use std::fmt;

use crate::constants::{MAXIMUM_LATITUDE, MAXIMUM_LONGITUDE, MINIMUM_LATITUDE, MINIMUM_LONGITUDE};

/// A coordinate value that fell outside its valid range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    /// Latitude outside -90..=90 degrees (or not finite).
    Latitude(f64),
    /// Longitude outside -180..=180 degrees (or not finite).
    Longitude(f64),
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latitude(value) => {
                write!(f, "invalid latitude: {value} (must be between -90 and 90)")
            }
            Self::Longitude(value) => {
                write!(
                    f,
                    "invalid longitude: {value} (must be between -180 and 180)"
                )
            }
        }
    }
}

impl std::error::Error for CoordinateError {}

/// Check that a latitude lies within -90..=90 degrees.
///
/// NaN fails the range check and is rejected along with out-of-range values.
pub fn check_latitude(latitude: f64) -> Result<(), CoordinateError> {
    if !(MINIMUM_LATITUDE..=MAXIMUM_LATITUDE).contains(&latitude) {
        return Err(CoordinateError::Latitude(latitude));
    }
    Ok(())
}

/// Check that a longitude lies within -180..=180 degrees.
pub fn check_longitude(longitude: f64) -> Result<(), CoordinateError> {
    if !(MINIMUM_LONGITUDE..=MAXIMUM_LONGITUDE).contains(&longitude) {
        return Err(CoordinateError::Longitude(longitude));
    }
    Ok(())
}

/// An immutable latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and build a coordinate pair. Latitude is checked first.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        check_latitude(latitude)?;
        check_longitude(longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{ns}, {:.4}°{ew}",
            self.latitude.abs(),
            self.longitude.abs()
        )
    }
}
