//! Geographic sunrise/sunset calculations.
//!
//! ## Module Structure
//!
//! - [`coordinates`]: Validated latitude/longitude pairs
//! - [`solar`]: The sunrise/sunset calculator and its error type
//! - [`times`]: Local-day anchoring, day length and next-event search
//! - [`timezone`]: Timezone lookup from coordinates
//! - [`geocoding`]: Place-name resolution boundary
//! - [`display`]: Formatting and debug output for calculator results
//!
//! The calculator in [`solar`] is pure. Everything that touches the clock,
//! the filesystem or the terminal lives outside it.

pub mod coordinates;
pub mod display;
pub mod geocoding;
pub mod solar;
pub mod times;
pub mod timezone;

// Re-exports for public API
pub use coordinates::{CoordinateError, Coordinates};
pub use display::log_solar_debug_info;
pub use geocoding::{Geocoder, GeocodingResult, set_location_by_place};
pub use solar::{
    SolarError, SolarEvent, calculate, calculate_solar_event, calculate_sunrise, calculate_sunset,
};
pub use times::{SunTimes, event_on_local_day, next_event};
pub use timezone::determine_timezone_from_coordinates;
