use chrono::{FixedOffset, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use limelight::geo::solar::universal_time_hours;
use limelight::geo::{
    Coordinates, SolarError, SolarEvent, SunTimes, calculate, calculate_solar_event,
};
use proptest::prelude::*;

/// Generate valid latitude values
fn latitude_strategy() -> impl Strategy<Value = f64> {
    -90.0..=90.0
}

/// Generate valid longitude values
fn longitude_strategy() -> impl Strategy<Value = f64> {
    -180.0..=180.0
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2100, 1u32..=365).prop_map(|(year, ordinal)| {
        NaiveDate::from_yo_opt(year, ordinal).expect("ordinal 1..=365 exists in every year")
    })
}

fn event_strategy() -> impl Strategy<Value = SolarEvent> {
    prop_oneof![Just(SolarEvent::Sunrise), Just(SolarEvent::Sunset)]
}

fn timezone_strategy() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(Tz::UTC),
        Just(chrono_tz::America::Los_Angeles),
        Just(chrono_tz::Europe::London),
        Just(chrono_tz::Asia::Kolkata),
        Just(chrono_tz::Pacific::Chatham),
        Just(chrono_tz::Pacific::Kiritimati),
    ]
}

/// Latitudes strictly outside [-90, 90]
fn invalid_latitude_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![90.000_001..1000.0, -1000.0..-90.000_001]
}

/// Longitudes strictly outside [-180, 180]
fn invalid_longitude_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![180.000_001..1000.0, -1000.0..-180.000_001]
}

#[cfg(test)]
mod calculator_properties {
    use super::*;

    proptest! {
        /// Identical inputs give identical outputs
        #[test]
        fn test_deterministic(
            lat in latitude_strategy(),
            lon in longitude_strategy(),
            date in date_strategy(),
            event in event_strategy(),
        ) {
            let first = calculate(lat, lon, date, &Utc, event);
            let second = calculate(lat, lon, date, &Utc, event);
            prop_assert_eq!(first, second);
        }

        /// Out-of-range latitude is always an input error, never polar
        #[test]
        fn test_invalid_latitude_is_input_range(
            lat in invalid_latitude_strategy(),
            lon in longitude_strategy(),
            date in date_strategy(),
            event in event_strategy(),
        ) {
            let result = calculate(lat, lon, date, &Utc, event);
            prop_assert!(matches!(result, Err(SolarError::InputRange(_))), "got {:?}", result);
        }

        /// Out-of-range longitude is always an input error
        #[test]
        fn test_invalid_longitude_is_input_range(
            lat in latitude_strategy(),
            lon in invalid_longitude_strategy(),
            date in date_strategy(),
            event in event_strategy(),
        ) {
            let result = calculate(lat, lon, date, &Utc, event);
            prop_assert!(matches!(result, Err(SolarError::InputRange(_))), "got {:?}", result);
        }

        /// Valid input yields an instant on the requested UTC date with whole
        /// seconds, or a polar outcome
        #[test]
        fn test_valid_input_outcomes(
            lat in latitude_strategy(),
            lon in longitude_strategy(),
            date in date_strategy(),
            event in event_strategy(),
        ) {
            match calculate(lat, lon, date, &Utc, event) {
                Ok(instant) => {
                    prop_assert_eq!(instant.date_naive(), date);
                    prop_assert_eq!(instant.nanosecond(), 0);
                }
                Err(err) => prop_assert!(err.is_polar(), "got {:?}", err),
            }
        }

        /// The reported second never runs ahead of the computed universal
        /// time and trails it by less than one second
        #[test]
        fn test_seconds_are_truncated_not_rounded(
            lat in -60.0f64..60.0,
            lon in longitude_strategy(),
            date in date_strategy(),
            event in event_strategy(),
        ) {
            let coordinates = Coordinates::new(lat, lon).unwrap();
            let ut = universal_time_hours(coordinates, date, event).unwrap();
            let instant = calculate_solar_event(coordinates, date, &Utc, event).unwrap();

            let midnight = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
            let reported = instant.signed_duration_since(midnight).num_seconds() as f64;
            let exact = ut * 3600.0;
            prop_assert!(reported <= exact + 1e-6, "reported {} exact {}", reported, exact);
            prop_assert!(exact - reported < 1.0 + 1e-6, "reported {} exact {}", reported, exact);
        }

        /// Polar outcomes need a high latitude
        #[test]
        fn test_no_polar_outcome_below_65_degrees(
            lat in -65.0f64..65.0,
            lon in longitude_strategy(),
            date in date_strategy(),
            event in event_strategy(),
        ) {
            prop_assert!(calculate(lat, lon, date, &Utc, event).is_ok());
        }

        /// The timezone changes the presentation, not the instant
        #[test]
        fn test_timezone_does_not_move_the_instant(
            lat in -60.0f64..60.0,
            lon in longitude_strategy(),
            date in date_strategy(),
            event in event_strategy(),
            tz in timezone_strategy(),
        ) {
            let in_utc = calculate(lat, lon, date, &Utc, event).unwrap();
            let in_tz = calculate(lat, lon, date, &tz, event).unwrap();
            prop_assert_eq!(in_tz.with_timezone(&Utc), in_utc);
        }
    }
}

#[cfg(test)]
mod local_day_properties {
    use super::*;

    proptest! {
        /// On the local calendar day, sunrise comes before sunset at
        /// moderate latitudes
        #[test]
        fn test_sunrise_before_sunset(
            lat in -60.0f64..60.0,
            lon in longitude_strategy(),
            date in date_strategy(),
        ) {
            // Civil offset closest to local mean time at this longitude
            let offset_hours = (lon / 15.0).round() as i32;
            let tz = FixedOffset::east_opt(offset_hours * 3600).unwrap();
            let coordinates = Coordinates::new(lat, lon).unwrap();

            let times = SunTimes::for_local_day(coordinates, date, &tz);
            let sunrise = times.sunrise.clone().unwrap();
            let sunset = times.sunset.clone().unwrap();

            prop_assert_eq!(sunrise.date_naive(), date);
            prop_assert_eq!(sunset.date_naive(), date);
            prop_assert!(sunrise < sunset, "sunrise {} sunset {}", sunrise, sunset);
            prop_assert!(times.day_length().is_some());
        }
    }
}
