//! Display and formatting utilities for the geo module.
//!
//! Renders calculator results in the box-drawing log style: the instant in
//! the presentation timezone, its UTC equivalent, and (with `--debug`) the
//! intermediate solar position that produced it.

use chrono::{DateTime, NaiveDate, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use super::coordinates::Coordinates;
use super::solar::{SolarError, SolarEvent, SolarPosition};
use super::times::SunTimes;
use crate::constants::TIME_FORMAT;

/// Format an instant as `HH:MM:SS TZ (HH:MM:SS UTC)`.
pub fn format_instant(instant: &DateTime<Tz>) -> String {
    let utc = instant.with_timezone(&Utc);
    if instant.offset().fix().local_minus_utc() == 0 {
        format!("{} {}", instant.format(TIME_FORMAT), instant.format("%Z"))
    } else {
        format!(
            "{} {} ({} UTC)",
            instant.format(TIME_FORMAT),
            instant.format("%Z"),
            utc.format(TIME_FORMAT)
        )
    }
}

/// Human wording for a failed event.
pub fn describe_error(err: &SolarError) -> String {
    match err {
        SolarError::InputRange(inner) => inner.to_string(),
        SolarError::NeverRises { .. } => "Sun does not rise (polar night)".to_string(),
        SolarError::NeverSets { .. } => "Sun does not set (polar day)".to_string(),
    }
}

/// Log a single event result.
pub fn log_event(event: SolarEvent, date: NaiveDate, result: &Result<DateTime<Tz>, SolarError>) {
    match result {
        Ok(instant) => {
            log_block_start!("{} on {date}:", capitalize(event.as_str()));
            log_indented!("{}", format_instant(instant));
            if instant.date_naive() != date {
                log_indented!("(falls on {} in {})", instant.date_naive(), instant.timezone());
            }
        }
        Err(err) => {
            log_block_start!("{} on {date}:", capitalize(event.as_str()));
            log_indented!("{}", describe_error(err));
        }
    }
}

/// Log both events for a day and the resulting day length.
pub fn log_sun_times(times: &SunTimes<Tz>) {
    log_block_start!("Solar events for {} at {}", times.date, times.coordinates);

    for event in [SolarEvent::Sunrise, SolarEvent::Sunset] {
        let label = format!("{:>8}", capitalize(event.as_str()));
        match times.event(event) {
            Ok(instant) => log_indented!("{label}: {}", format_instant(instant)),
            Err(err) => log_indented!("{label}: {}", describe_error(err)),
        }
    }

    match times.day_length() {
        Some(length) => log_indented!(
            "Day length: {}h {:02}m",
            length.num_hours(),
            length.num_minutes() % 60
        ),
        None => match (&times.sunrise, &times.sunset) {
            (Err(SolarError::NeverRises { .. }), _) | (_, Err(SolarError::NeverRises { .. })) => {
                log_indented!("Day length: 0h 00m (polar night)")
            }
            (Err(SolarError::NeverSets { .. }), _) | (_, Err(SolarError::NeverSets { .. })) => {
                log_indented!("Day length: 24h 00m (polar day)")
            }
            _ => {}
        },
    }
}

/// Log the intermediate solar position for `--debug`.
pub fn log_solar_debug_info(coordinates: Coordinates, date: NaiveDate, event: SolarEvent) {
    let position = SolarPosition::at(date, coordinates.longitude(), event);
    let cos_h = position.cos_local_hour_angle(coordinates.latitude());

    log_pipe!();
    log_debug!("Solar calculation details ({event}):");
    log_indented!("        Raw coordinates: {coordinates}");
    log_indented!("       Approximate time: day {:.5}", position.approximate_time);
    log_indented!("           Mean anomaly: {:.4}°", position.mean_anomaly);
    log_indented!("         True longitude: {:.4}°", position.true_longitude);
    log_indented!("        Right ascension: {:.4}h", position.right_ascension);
    log_indented!("            Declination: {:.4}°", position.declination());
    log_indented!("    cos(local hour ang): {cos_h:.6}");

    if cos_h > 1.0 {
        log_indented!("Sun stays below the horizon (cos H > 1)");
    } else if cos_h < -1.0 {
        log_indented!("Sun stays above the horizon (cos H < -1)");
    }
}

/// Log the presentation timezone next to its current UTC offset.
pub fn log_timezone(tz: Tz, at: DateTime<Utc>) {
    let offset = tz.offset_from_utc_datetime(&at.naive_utc()).fix();
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    log_indented!(
        "Timezone: {} (UTC{sign}{:02}:{:02})",
        tz.name(),
        secs / 3600,
        (secs % 3600) / 60
    );
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_instant_shows_utc_for_offset_zones() {
        let instant = chrono_tz::America::Los_Angeles
            .with_ymd_and_hms(2024, 12, 21, 7, 23, 5)
            .unwrap();
        assert_eq!(format_instant(&instant), "07:23:05 PST (15:23:05 UTC)");
    }

    #[test]
    fn test_format_instant_omits_duplicate_utc() {
        let instant = Tz::UTC.with_ymd_and_hms(2024, 6, 21, 3, 43, 0).unwrap();
        assert_eq!(format_instant(&instant), "03:43:00 UTC");
    }

    #[test]
    fn test_describe_error() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
        assert_eq!(
            describe_error(&SolarError::NeverRises {
                latitude: 85.0,
                date
            }),
            "Sun does not rise (polar night)"
        );
        assert_eq!(
            describe_error(&SolarError::NeverSets {
                latitude: 85.0,
                date
            }),
            "Sun does not set (polar day)"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("sunrise"), "Sunrise");
        assert_eq!(capitalize(""), "");
    }
}
