//! Sunrise and sunset for a whole local day, and the next upcoming event.
//!
//! The calculator anchors its result on the requested date *in UTC*. Far from
//! the prime meridian that instant can fall on the neighbouring local day
//! (San Francisco's winter sunset is 00:54 UTC, which is the previous evening
//! in Pacific time). Automation engines think in local days, so this module
//! re-anchors each event onto the local calendar day it was asked about.

use chrono::{DateTime, Duration, NaiveDate, TimeZone};

use super::coordinates::Coordinates;
use super::solar::{SolarError, SolarEvent, calculate_solar_event};
use crate::constants::NEXT_EVENT_SEARCH_DAYS;

/// Both solar events for one local calendar day.
///
/// Each event is its own `Result`: on a polar day the sunset can fail with
/// `NeverSets` while the caller still wants to know what happened to sunrise.
#[derive(Debug, Clone)]
pub struct SunTimes<Z: TimeZone> {
    pub coordinates: Coordinates,
    pub date: NaiveDate,
    pub sunrise: Result<DateTime<Z>, SolarError>,
    pub sunset: Result<DateTime<Z>, SolarError>,
}

impl<Z: TimeZone> SunTimes<Z> {
    /// Raw calculator output for `date`, without local-day anchoring.
    pub fn for_date(coordinates: Coordinates, date: NaiveDate, tz: &Z) -> Self {
        Self {
            coordinates,
            date,
            sunrise: calculate_solar_event(coordinates, date, tz, SolarEvent::Sunrise),
            sunset: calculate_solar_event(coordinates, date, tz, SolarEvent::Sunset),
        }
    }

    /// Events that fall on `date` as seen in `tz`.
    pub fn for_local_day(coordinates: Coordinates, date: NaiveDate, tz: &Z) -> Self {
        Self {
            coordinates,
            date,
            sunrise: event_on_local_day(coordinates, date, tz, SolarEvent::Sunrise),
            sunset: event_on_local_day(coordinates, date, tz, SolarEvent::Sunset),
        }
    }

    /// Look up one of the two events.
    pub fn event(&self, event: SolarEvent) -> &Result<DateTime<Z>, SolarError> {
        match event {
            SolarEvent::Sunrise => &self.sunrise,
            SolarEvent::Sunset => &self.sunset,
        }
    }

    /// Time between sunrise and sunset, when both exist and are in order.
    pub fn day_length(&self) -> Option<Duration> {
        match (&self.sunrise, &self.sunset) {
            (Ok(sunrise), Ok(sunset)) if sunrise < sunset => {
                Some(sunset.clone().signed_duration_since(sunrise.clone()))
            }
            _ => None,
        }
    }
}

/// Compute `event` so that it lands on `date` in `tz`.
///
/// The calculator is tried with the requested date first, then with the day
/// before and the day after. The first result whose local date matches wins.
///
/// When the event sits right at 00:00 UTC the neighbouring results can all
/// miss the local day (one lands just before midnight, the next just after).
/// The requested date's result is then moved by whole days onto the local
/// day. That instant is an approximation: it can differ from a calculation
/// anchored on the local day by the event's day-to-day drift (seconds to a
/// few minutes). Polar outcomes are reported for the requested date as-is.
pub fn event_on_local_day<Z: TimeZone>(
    coordinates: Coordinates,
    date: NaiveDate,
    tz: &Z,
    event: SolarEvent,
) -> Result<DateTime<Z>, SolarError> {
    let raw = calculate_solar_event(coordinates, date, tz, event)?;
    if raw.date_naive() == date {
        return Ok(raw);
    }

    for offset in [-1, 1] {
        let Some(neighbour) = date.checked_add_signed(Duration::days(offset)) else {
            continue;
        };
        if let Ok(candidate) = calculate_solar_event(coordinates, neighbour, tz, event)
            && candidate.date_naive() == date
        {
            return Ok(candidate);
        }
    }

    let shift = date.signed_duration_since(raw.date_naive()).num_days();
    Ok(raw + Duration::days(shift))
}

/// First occurrence of `event` strictly after `now`.
///
/// Starts from the local day of `now` (in `now`'s timezone) and walks forward
/// up to [`NEXT_EVENT_SEARCH_DAYS`] days, skipping polar days. When every day
/// in the window is polar, the last polar error is returned.
pub fn next_event<Z: TimeZone>(
    coordinates: Coordinates,
    event: SolarEvent,
    now: &DateTime<Z>,
) -> Result<DateTime<Z>, SolarError> {
    let tz = now.timezone();
    let start = now.date_naive();
    let mut last_error = None;

    for offset in 0..=NEXT_EVENT_SEARCH_DAYS {
        let Some(date) = start.checked_add_signed(Duration::days(offset)) else {
            break;
        };
        match event_on_local_day(coordinates, date, &tz, event) {
            Ok(instant) if instant > *now => return Ok(instant),
            Ok(_) => {}
            Err(err) => last_error = Some(err),
        }
    }

    // Only reachable when the whole window is polar
    Err(last_error.unwrap_or(match event {
        SolarEvent::Sunrise => SolarError::NeverRises {
            latitude: coordinates.latitude(),
            date: start,
        },
        SolarEvent::Sunset => SolarError::NeverSets {
            latitude: coordinates.latitude(),
            date: start,
        },
    }))
}
