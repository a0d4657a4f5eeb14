//! Command-line command handlers for limelight.
//!
//! Each command lives in its own submodule. Handlers take the resolved config
//! path so they never depend on process-wide state beyond the logger.

pub mod help;
pub mod location;
pub mod sun;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::path::Path;

use crate::args::QueryOptions;
use crate::config::{self, Config};
use crate::geo::{Coordinates, SolarError, determine_timezone_from_coordinates};
use crate::time_source::source_for;

/// A failure that the command has already shown to the user.
///
/// `main` maps it to a failing exit code without printing it again.
#[derive(Debug)]
pub struct ReportedError(pub SolarError);

impl std::fmt::Display for ReportedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ReportedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Everything a query command needs, resolved from flags and the store.
#[derive(Debug, Clone)]
pub struct Query {
    /// Raw degrees; range checking is the calculator's job so that it can
    /// report `InputRange` like any other outcome.
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Tz,
    pub now: DateTime<Utc>,
    /// `now` was pinned with `--at` rather than read from the system clock
    pub now_is_fixed: bool,
    pub date: NaiveDate,
}

impl Query {
    pub fn coordinates(&self) -> Result<Coordinates, SolarError> {
        Ok(Coordinates::new(self.latitude, self.longitude)?)
    }

    /// Reference instant in the presentation timezone.
    pub fn local_now(&self) -> DateTime<Tz> {
        self.now.with_timezone(&self.timezone)
    }
}

/// Resolve coordinates, timezone, reference instant and date for a query.
///
/// Precedence: command-line flags, then the stored config, then the
/// timezone of the coordinates (or UTC when they are out of range).
pub fn resolve_query(options: &QueryOptions, config_path: &Path) -> Result<Query> {
    let explicit = options.latitude.zip(options.longitude);

    // The store is only read when something is missing
    let stored = if explicit.is_some() && options.timezone.is_some() {
        None
    } else {
        config::load_from_path(config_path)?
    };

    let (latitude, longitude) = match explicit {
        Some(pair) => pair,
        None => {
            let coordinates = stored
                .as_ref()
                .map(Config::coordinates)
                .transpose()?
                .flatten()
                .context(
                    "No location set. Run 'limelight location set <LAT> <LON>' or pass --lat and --lon",
                )?;
            (coordinates.latitude(), coordinates.longitude())
        }
    };

    let timezone = match options.timezone {
        Some(tz) => tz,
        None => match stored.as_ref().map(Config::timezone).transpose()?.flatten() {
            Some(tz) => tz,
            None => match Coordinates::new(latitude, longitude) {
                Ok(c) => determine_timezone_from_coordinates(c.latitude(), c.longitude()),
                Err(_) => Tz::UTC,
            },
        },
    };

    let clock = source_for(options.at.as_deref(), timezone).context("Invalid --at value")?;
    let now = clock.now();
    let now_is_fixed = clock.is_fixed();
    let date = options
        .date
        .unwrap_or_else(|| now.with_timezone(&timezone).date_naive());

    Ok(Query {
        latitude,
        longitude,
        timezone,
        now,
        now_is_fixed,
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test_constants::*;
    use tempfile::tempdir;

    fn stored(path: &Path, lat: f64, lon: f64, tz: Option<&str>) {
        config::save_to_path(
            &Config {
                latitude: Some(lat),
                longitude: Some(lon),
                timezone: tz.map(str::to_string),
            },
            path,
        )
        .unwrap();
    }

    #[test]
    fn test_flags_win_over_store() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("limelight.toml");
        let (lat, lon) = LONDON;
        stored(&path, lat, lon, Some("Europe/London"));

        let (lat, lon) = SAN_FRANCISCO;
        let options = QueryOptions {
            latitude: Some(lat),
            longitude: Some(lon),
            timezone: Some(chrono_tz::Asia::Tokyo),
            date: NaiveDate::from_ymd_opt(2024, 12, 21),
            ..QueryOptions::default()
        };
        let query = resolve_query(&options, &path).unwrap();

        assert_eq!((query.latitude, query.longitude), (lat, lon));
        assert_eq!(query.timezone, chrono_tz::Asia::Tokyo);
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2024, 12, 21).unwrap());
    }

    #[test]
    fn test_store_supplies_location_and_timezone() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("limelight.toml");
        let (lat, lon) = NEW_YORK;
        stored(&path, lat, lon, Some("UTC"));

        let query = resolve_query(&QueryOptions::default(), &path).unwrap();
        assert_eq!((query.latitude, query.longitude), (lat, lon));
        assert_eq!(query.timezone, Tz::UTC);
        assert!(!query.now_is_fixed);
    }

    #[test]
    fn test_timezone_falls_back_to_coordinates() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("limelight.toml");
        let (lat, lon) = SAN_FRANCISCO;
        stored(&path, lat, lon, None);

        let query = resolve_query(&QueryOptions::default(), &path).unwrap();
        assert_eq!(query.timezone, chrono_tz::America::Los_Angeles);
    }

    #[test]
    fn test_out_of_range_flags_resolve_to_utc() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("limelight.toml");

        let options = QueryOptions {
            latitude: Some(91.0),
            longitude: Some(0.0),
            ..QueryOptions::default()
        };
        let query = resolve_query(&options, &path).unwrap();
        assert_eq!(query.timezone, Tz::UTC);
        assert!(matches!(
            query.coordinates(),
            Err(SolarError::InputRange(_))
        ));
    }

    #[test]
    fn test_missing_location_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("limelight.toml");

        let err = resolve_query(&QueryOptions::default(), &path).unwrap_err();
        assert!(err.to_string().contains("No location set"));
    }

    #[test]
    fn test_at_pins_now_and_date() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("limelight.toml");
        let (lat, lon) = SAN_FRANCISCO;

        let options = QueryOptions {
            latitude: Some(lat),
            longitude: Some(lon),
            timezone: Some(chrono_tz::America::Los_Angeles),
            at: Some("2024-12-21 18:00:00".to_string()),
            ..QueryOptions::default()
        };
        let query = resolve_query(&options, &path).unwrap();

        // 18:00 PST is 02:00 UTC the next day, but "today" is local
        assert_eq!(query.now.date_naive(), NaiveDate::from_ymd_opt(2024, 12, 22).unwrap());
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2024, 12, 21).unwrap());
        assert!(query.now_is_fixed);
    }

    #[test]
    fn test_invalid_at_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("limelight.toml");

        let options = QueryOptions {
            latitude: Some(0.0),
            longitude: Some(0.0),
            timezone: Some(Tz::UTC),
            at: Some("whenever".to_string()),
            ..QueryOptions::default()
        };
        assert!(resolve_query(&options, &path).is_err());
    }
}
