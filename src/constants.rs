//! Application-wide constants.
//!
//! Physical constants of the solar model live next to the algorithm in
//! `geo::solar`; this module holds the values shared by the surrounding
//! layers (configuration, command line, scheduling).

// # Application

pub const APP_NAME: &str = "limelight";
pub const CONFIG_FILE_NAME: &str = "limelight.toml";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

// # Coordinate bounds (degrees)

pub const MINIMUM_LATITUDE: f64 = -90.0;
pub const MAXIMUM_LATITUDE: f64 = 90.0;
pub const MINIMUM_LONGITUDE: f64 = -180.0;
pub const MAXIMUM_LONGITUDE: f64 = 180.0;

// # Scheduling

/// How many days past today `next_event` looks before giving up.
/// One full year covers the longest polar night.
pub const NEXT_EVENT_SEARCH_DAYS: i64 = 366;

// # Display formats

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Well-known locations shared by unit and integration tests.
#[cfg(any(test, feature = "testing-support"))]
pub mod test_constants {
    pub const SAN_FRANCISCO: (f64, f64) = (37.7749, -122.4194);
    pub const NEW_YORK: (f64, f64) = (40.7128, -74.0060);
    pub const LONDON: (f64, f64) = (51.5074, -0.1278);
    pub const POLAR_NORTH: (f64, f64) = (85.0, 0.0);
}
