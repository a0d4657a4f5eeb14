//! Coordinate to timezone lookup.
//!
//! Results are presented in the coordinate's own timezone unless the user
//! configures one explicitly. The lookup uses the timezone boundary data
//! bundled with `tzf-rs`.

use chrono_tz::Tz;
use once_cell::sync::Lazy;
use tzf_rs::DefaultFinder;

// Building the finder decodes the bundled boundary data; do it once
static FINDER: Lazy<DefaultFinder> = Lazy::new(DefaultFinder::new);

/// Determine the IANA timezone for the given coordinates.
///
/// Falls back to `$TZ` and finally UTC when the boundary data yields a name
/// that chrono-tz does not know (open ocean, disputed areas).
pub fn determine_timezone_from_coordinates(latitude: f64, longitude: f64) -> Tz {
    // tzf-rs takes (longitude, latitude)
    let tz_name = FINDER.get_tz_name(longitude, latitude);

    match tz_name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => match std::env::var("TZ") {
            Ok(tz_str) => tz_str.parse().unwrap_or(Tz::UTC),
            Err(_) => Tz::UTC,
        },
    }
}
