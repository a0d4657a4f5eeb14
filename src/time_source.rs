//! Source of "now" for the command line.
//!
//! The solar calculator never reads the clock; only the layers that need a
//! default date ("today") or a reference instant ("next sunset") do, and they
//! all go through a [`TimeSource`]. A fixed source lets `--at` pin the
//! reference instant so automation schedules can be previewed and tested.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Trait for abstracting the current time
pub trait TimeSource: Send + Sync {
    /// Get the current instant
    fn now(&self) -> DateTime<Utc>;

    /// Whether this source is pinned to a fixed instant
    fn is_fixed(&self) -> bool {
        false
    }
}

/// Real-time implementation that uses the system clock
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A time source frozen at one instant.
pub struct FixedTimeSource {
    instant: DateTime<Utc>,
}

impl FixedTimeSource {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn is_fixed(&self) -> bool {
        true
    }
}

/// Pick the clock for one command: pinned to `at` (interpreted in `tz`)
/// when given, the system clock otherwise.
pub fn source_for(at: Option<&str>, tz: Tz) -> anyhow::Result<Box<dyn TimeSource>> {
    match at {
        Some(at) => {
            let instant = parse_datetime_in_tz(at, tz).map_err(anyhow::Error::msg)?;
            Ok(Box::new(FixedTimeSource::new(instant)))
        }
        None => Ok(Box::new(RealTimeSource)),
    }
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS" in `tz`.
///
/// RFC 3339 strings with an explicit offset are accepted as well, in which
/// case `tz` is ignored.
pub fn parse_datetime_in_tz(s: &str, tz: Tz) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map_err(|e| {
        format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS or RFC 3339")
    })?;

    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("Ambiguous or invalid time in timezone {tz}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_source_is_stable() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let source = FixedTimeSource::new(instant);
        assert_eq!(source.now(), instant);
        assert_eq!(source.now(), source.now());
        assert!(source.is_fixed());
        assert!(!RealTimeSource.is_fixed());
    }

    #[test]
    fn test_source_for() {
        let fixed = source_for(Some("2024-12-21 18:00:00"), chrono_tz::America::Los_Angeles).unwrap();
        assert!(fixed.is_fixed());
        assert_eq!(fixed.now(), Utc.with_ymd_and_hms(2024, 12, 22, 2, 0, 0).unwrap());

        let real = source_for(None, Tz::UTC).unwrap();
        assert!(!real.is_fixed());

        assert!(source_for(Some("soon"), Tz::UTC).is_err());
    }

    #[test]
    fn test_parse_local_datetime() {
        let parsed = parse_datetime_in_tz("2024-06-21 08:30:00", chrono_tz::Europe::London).unwrap();
        // BST is UTC+1 in June
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 21, 7, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_ignores_zone() {
        let parsed =
            parse_datetime_in_tz("2024-12-21T20:00:00-08:00", chrono_tz::Asia::Tokyo).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 12, 22, 4, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime_in_tz("tomorrow", Tz::UTC).is_err());
        assert!(parse_datetime_in_tz("2024-13-01 00:00:00", Tz::UTC).is_err());
    }

    #[test]
    fn test_parse_rejects_nonexistent_local_time() {
        // Clocks jump from 01:00 to 02:00 in London on 2024-03-31
        let result = parse_datetime_in_tz("2024-03-31 01:30:00", chrono_tz::Europe::London);
        assert!(result.is_err());
    }
}
