//! Sunrise and sunset calculation.
//!
//! Implements the standard single-pass sunrise/sunset approximation from the
//! Almanac for Computers (1990): seed an approximate time from the day of year
//! and the longitude, derive the sun's true longitude, right ascension and
//! declination at that moment, then solve for the hour angle at which the sun
//! crosses the reference zenith of 90.833° (34 arcminutes of refraction plus
//! the solar semi-diameter).
//!
//! There is no iterative refinement. Accuracy is about one to a few minutes at
//! moderate latitudes, which is plenty for triggering automations.
//!
//! The calculator is a pure function: no I/O, no logging, no shared state.
//! Identical inputs always produce identical outputs, and any number of
//! threads may call it concurrently.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use super::coordinates::{CoordinateError, Coordinates};

// # Physical model

/// Zenith angle of the sun's centre at sunrise/sunset, in degrees.
pub const ZENITH: f64 = 90.833;

const SUNRISE_SEED_HOUR: f64 = 6.0;
const SUNSET_SEED_HOUR: f64 = 18.0;

const MEAN_ANOMALY_RATE: f64 = 0.9856;
const MEAN_ANOMALY_OFFSET: f64 = 3.289;

const CENTER_FIRST_HARMONIC: f64 = 1.916;
const CENTER_SECOND_HARMONIC: f64 = 0.020;
const PERIHELION_LONGITUDE: f64 = 282.634;

/// cos(ε) and sin(ε) for the obliquity of the ecliptic.
const COS_OBLIQUITY: f64 = 0.91764;
const SIN_OBLIQUITY: f64 = 0.39782;

const SIDEREAL_RATE: f64 = 0.06571;
const LOCAL_MEAN_TIME_OFFSET: f64 = 6.622;

const DEGREES_PER_HOUR: f64 = 15.0;

/// Which horizon crossing to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolarEvent {
    Sunrise,
    Sunset,
}

impl SolarEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolarEvent::Sunrise => "sunrise",
            SolarEvent::Sunset => "sunset",
        }
    }

    /// Local hour used to seed the approximate time of the event.
    fn seed_hour(&self) -> f64 {
        match self {
            SolarEvent::Sunrise => SUNRISE_SEED_HOUR,
            SolarEvent::Sunset => SUNSET_SEED_HOUR,
        }
    }
}

impl fmt::Display for SolarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SolarEvent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sunrise" => Ok(SolarEvent::Sunrise),
            "sunset" => Ok(SolarEvent::Sunset),
            other => anyhow::bail!("unknown solar event '{other}' (expected sunrise or sunset)"),
        }
    }
}

/// Why a solar event could not be computed.
///
/// All three outcomes are final: the calculation is deterministic, so
/// retrying with the same inputs reproduces the same error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolarError {
    /// Latitude or longitude out of range. Raised before any trigonometry.
    InputRange(CoordinateError),
    /// Polar night: the sun stays below the horizon all day.
    NeverRises { latitude: f64, date: NaiveDate },
    /// Polar day: the sun stays above the horizon all day.
    NeverSets { latitude: f64, date: NaiveDate },
}

impl SolarError {
    /// Stable identifier for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            SolarError::InputRange(_) => "input_range",
            SolarError::NeverRises { .. } => "never_rises",
            SolarError::NeverSets { .. } => "never_sets",
        }
    }

    /// True for the two polar outcomes.
    pub fn is_polar(&self) -> bool {
        matches!(
            self,
            SolarError::NeverRises { .. } | SolarError::NeverSets { .. }
        )
    }
}

impl fmt::Display for SolarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolarError::InputRange(err) => write!(f, "{err}"),
            SolarError::NeverRises { latitude, date } => write!(
                f,
                "sun never rises at latitude {latitude:.4}° on {date} (polar night)"
            ),
            SolarError::NeverSets { latitude, date } => write!(
                f,
                "sun never sets at latitude {latitude:.4}° on {date} (polar day)"
            ),
        }
    }
}

impl std::error::Error for SolarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolarError::InputRange(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CoordinateError> for SolarError {
    fn from(err: CoordinateError) -> Self {
        SolarError::InputRange(err)
    }
}

/// Intermediate solar position at the approximate event time.
///
/// Exposed for diagnostics (`--debug` output); the calculator itself only
/// needs the final universal time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Approximate event time in fractional days of the year.
    pub approximate_time: f64,
    /// Mean anomaly in degrees (not normalized).
    pub mean_anomaly: f64,
    /// True ecliptic longitude in degrees, within [0, 360).
    pub true_longitude: f64,
    /// Right ascension in hours, in the same quadrant as the true longitude.
    pub right_ascension: f64,
    pub sin_declination: f64,
    pub cos_declination: f64,
}

impl SolarPosition {
    /// Compute the sun's position for the approximate time of `event` on
    /// `date` at `longitude`.
    pub fn at(date: NaiveDate, longitude: f64, event: SolarEvent) -> Self {
        let lng_hour = longitude / DEGREES_PER_HOUR;
        let approximate_time =
            f64::from(date.ordinal()) + (event.seed_hour() - lng_hour) / 24.0;

        let mean_anomaly = MEAN_ANOMALY_RATE * approximate_time - MEAN_ANOMALY_OFFSET;

        let true_longitude = normalize_degrees(
            mean_anomaly
                + CENTER_FIRST_HARMONIC * sin_deg(mean_anomaly)
                + CENTER_SECOND_HARMONIC * sin_deg(2.0 * mean_anomaly)
                + PERIHELION_LONGITUDE,
        );

        let right_ascension = right_ascension_hours(true_longitude);

        let sin_declination = SIN_OBLIQUITY * sin_deg(true_longitude);
        let cos_declination = sin_declination.asin().cos();

        Self {
            approximate_time,
            mean_anomaly,
            true_longitude,
            right_ascension,
            sin_declination,
            cos_declination,
        }
    }

    /// Declination in degrees.
    pub fn declination(&self) -> f64 {
        self.sin_declination.asin().to_degrees()
    }

    /// Cosine of the local hour angle at which the sun reaches [`ZENITH`].
    ///
    /// Values above 1 mean the sun never climbs to the horizon; values below
    /// -1 mean it never drops to it.
    pub fn cos_local_hour_angle(&self, latitude: f64) -> f64 {
        (cos_deg(ZENITH) - self.sin_declination * sin_deg(latitude))
            / (self.cos_declination * cos_deg(latitude))
    }
}

/// Compute sunrise or sunset for validated coordinates.
///
/// The instant is reconstructed on `date` in UTC (hours, minutes and seconds
/// truncated, not rounded) and returned in `tz`.
pub fn calculate_solar_event<Z: TimeZone>(
    coordinates: Coordinates,
    date: NaiveDate,
    tz: &Z,
    event: SolarEvent,
) -> Result<DateTime<Z>, SolarError> {
    let ut = universal_time_hours(coordinates, date, event)?;
    Ok(instant_on_date(date, ut).with_timezone(tz))
}

/// Compute sunrise or sunset from raw degrees.
///
/// Coordinates are range-checked before anything else, so an invalid
/// latitude is always reported as [`SolarError::InputRange`] and never as a
/// polar condition.
pub fn calculate<Z: TimeZone>(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    tz: &Z,
    event: SolarEvent,
) -> Result<DateTime<Z>, SolarError> {
    let coordinates = Coordinates::new(latitude, longitude)?;
    calculate_solar_event(coordinates, date, tz, event)
}

pub fn calculate_sunrise<Z: TimeZone>(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    tz: &Z,
) -> Result<DateTime<Z>, SolarError> {
    calculate(latitude, longitude, date, tz, SolarEvent::Sunrise)
}

pub fn calculate_sunset<Z: TimeZone>(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    tz: &Z,
) -> Result<DateTime<Z>, SolarError> {
    calculate(latitude, longitude, date, tz, SolarEvent::Sunset)
}

/// Universal time of the event in fractional hours within [0, 24).
pub fn universal_time_hours(
    coordinates: Coordinates,
    date: NaiveDate,
    event: SolarEvent,
) -> Result<f64, SolarError> {
    let latitude = coordinates.latitude();
    let lng_hour = coordinates.longitude() / DEGREES_PER_HOUR;
    let position = SolarPosition::at(date, coordinates.longitude(), event);

    let cos_h = position.cos_local_hour_angle(latitude);
    if cos_h > 1.0 {
        return Err(SolarError::NeverRises { latitude, date });
    }
    if cos_h < -1.0 {
        return Err(SolarError::NeverSets { latitude, date });
    }

    let hour_angle_degrees = match event {
        SolarEvent::Sunrise => 360.0 - cos_h.acos().to_degrees(),
        SolarEvent::Sunset => cos_h.acos().to_degrees(),
    };
    let hour_angle = hour_angle_degrees / DEGREES_PER_HOUR;

    let local_mean_time = hour_angle + position.right_ascension
        - SIDEREAL_RATE * position.approximate_time
        - LOCAL_MEAN_TIME_OFFSET;

    Ok(normalize_hours(local_mean_time - lng_hour))
}

/// Right ascension in hours, forced into the quadrant of `true_longitude`.
///
/// `atan` only answers within ±90°, so the raw result can sit 180° away from
/// the true value. Shifting it into L's quadrant removes the ambiguity;
/// without this, results drift by multiples of six hours.
fn right_ascension_hours(true_longitude: f64) -> f64 {
    let ra = normalize_degrees((COS_OBLIQUITY * tan_deg(true_longitude)).atan().to_degrees());

    let l_quadrant = (true_longitude / 90.0).floor() * 90.0;
    let ra_quadrant = (ra / 90.0).floor() * 90.0;

    (ra + (l_quadrant - ra_quadrant)) / DEGREES_PER_HOUR
}

/// Build the UTC instant `ut` hours after midnight on `date`.
///
/// Each component is truncated. `ut` is already within [0, 24); a value that
/// rounds up to exactly 24.0 rolls over to the next midnight.
pub(crate) fn instant_on_date(date: NaiveDate, ut: f64) -> DateTime<Utc> {
    let hours = ut.trunc();
    let fractional_minutes = (ut - hours) * 60.0;
    let minutes = fractional_minutes.trunc();
    let seconds = ((fractional_minutes - minutes) * 60.0).trunc();

    let offset = hours as i64 * 3600 + minutes as i64 * 60 + seconds as i64;
    let naive = date.and_time(NaiveTime::MIN) + Duration::seconds(offset);
    Utc.from_utc_datetime(&naive)
}

// # Degree helpers

fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

fn tan_deg(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}

/// Normalize an angle into [0, 360).
pub(crate) fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees % 360.0;
    if normalized < 0.0 {
        normalized + 360.0
    } else {
        normalized
    }
}

/// Normalize fractional hours into [0, 24).
pub(crate) fn normalize_hours(hours: f64) -> f64 {
    let normalized = hours % 24.0;
    if normalized < 0.0 {
        normalized + 24.0
    } else {
        normalized
    }
}
