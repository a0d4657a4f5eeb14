//! Sunrise, sunset, times and next-event commands.
//!
//! Human output goes through the logger; `--json` prints a single JSON
//! document on stdout instead. Any failed event (out-of-range input, polar
//! night, polar day) makes the command fail after it has been reported.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::path::Path;

use super::{Query, ReportedError, resolve_query};
use crate::args::QueryOptions;
use crate::geo::display::{
    describe_error, log_event, log_solar_debug_info, log_sun_times, log_timezone,
};
use crate::geo::{SolarError, SolarEvent, SunTimes, event_on_local_day, next_event};

/// One event as machine-readable output.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum EventReport {
    Found {
        event: &'static str,
        date: NaiveDate,
        timezone: String,
        utc: String,
        local: String,
    },
    Failed {
        event: &'static str,
        date: NaiveDate,
        error: String,
        kind: &'static str,
    },
}

impl EventReport {
    pub fn new(event: SolarEvent, date: NaiveDate, result: &Result<DateTime<Tz>, SolarError>) -> Self {
        match result {
            Ok(instant) => EventReport::Found {
                event: event.as_str(),
                date,
                timezone: instant.timezone().name().to_string(),
                utc: instant
                    .with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
                local: instant.to_rfc3339_opts(SecondsFormat::Secs, false),
            },
            Err(err) => EventReport::Failed {
                event: event.as_str(),
                date,
                error: err.to_string(),
                kind: err.kind(),
            },
        }
    }
}

/// Both events of a day as machine-readable output.
#[derive(Debug, Serialize, PartialEq)]
pub struct DayReport {
    pub date: NaiveDate,
    pub timezone: String,
    pub sunrise: EventReport,
    pub sunset: EventReport,
    /// Seconds between sunrise and sunset, absent on polar days
    pub day_length_seconds: Option<i64>,
}

impl DayReport {
    pub fn new(times: &SunTimes<Tz>, timezone: Tz) -> Self {
        Self {
            date: times.date,
            timezone: timezone.name().to_string(),
            sunrise: EventReport::new(SolarEvent::Sunrise, times.date, &times.sunrise),
            sunset: EventReport::new(SolarEvent::Sunset, times.date, &times.sunset),
            day_length_seconds: times.day_length().map(|d| d.num_seconds()),
        }
    }

    /// Report for a day that could not be computed at all.
    pub fn failed(date: NaiveDate, timezone: Tz, err: SolarError) -> Self {
        Self {
            date,
            timezone: timezone.name().to_string(),
            sunrise: EventReport::new(SolarEvent::Sunrise, date, &Err(err)),
            sunset: EventReport::new(SolarEvent::Sunset, date, &Err(err)),
            day_length_seconds: None,
        }
    }
}

/// `limelight sunrise|sunset`
pub fn handle_event_command(
    event: SolarEvent,
    options: &QueryOptions,
    config_path: &Path,
    debug_enabled: bool,
) -> Result<()> {
    let query = resolve_query(options, config_path)?;
    let result = compute_event(&query, event);

    if options.json {
        print_json(&EventReport::new(event, query.date, &result))?;
    } else {
        log_query(&query, debug_enabled, &[event]);
        log_event(event, query.date, &result);
        log_end!();
    }

    result.map(|_| ()).map_err(|err| ReportedError(err).into())
}

/// `limelight times`
pub fn handle_times_command(
    options: &QueryOptions,
    config_path: &Path,
    debug_enabled: bool,
) -> Result<()> {
    let query = resolve_query(options, config_path)?;
    let times = compute_times(&query);

    if options.json {
        let report = match &times {
            Ok(times) => DayReport::new(times, query.timezone),
            Err(err) => DayReport::failed(query.date, query.timezone, *err),
        };
        print_json(&report)?;
    } else {
        log_query(&query, debug_enabled, &[SolarEvent::Sunrise, SolarEvent::Sunset]);
        match &times {
            Ok(times) => log_sun_times(times),
            Err(err) => {
                log_block_start!("Solar events for {}", query.date);
                log_indented!("{}", describe_error(err));
            }
        }
        log_end!();
    }

    let times = times.map_err(ReportedError)?;
    match (times.sunrise, times.sunset) {
        (Err(err), _) | (_, Err(err)) => Err(ReportedError(err).into()),
        _ => Ok(()),
    }
}

/// `limelight next sunrise|sunset`
pub fn handle_next_command(
    event: SolarEvent,
    options: &QueryOptions,
    config_path: &Path,
    debug_enabled: bool,
) -> Result<()> {
    let query = resolve_query(options, config_path)?;
    let result = compute_next(&query, event);
    let date = match &result {
        Ok(instant) => instant.date_naive(),
        Err(_) => query.date,
    };

    if options.json {
        print_json(&EventReport::new(event, date, &result))?;
    } else {
        log_query(&query, debug_enabled, &[event]);
        if query.now_is_fixed {
            log_indented!("Reference time: {}", query.local_now().format("%Y-%m-%d %H:%M:%S %Z"));
        }
        match &result {
            Ok(_) => log_event(event, date, &result),
            Err(err) => {
                log_block_start!("No {event} within a year of {}", query.date);
                log_indented!("{err}");
            }
        }
        log_end!();
    }

    result.map(|_| ()).map_err(|err| ReportedError(err).into())
}

/// The requested event on the query's local day.
pub fn compute_event(query: &Query, event: SolarEvent) -> Result<DateTime<Tz>, SolarError> {
    let coordinates = query.coordinates()?;
    event_on_local_day(coordinates, query.date, &query.timezone, event)
}

/// Both events on the query's local day.
pub fn compute_times(query: &Query) -> Result<SunTimes<Tz>, SolarError> {
    let coordinates = query.coordinates()?;
    Ok(SunTimes::for_local_day(coordinates, query.date, &query.timezone))
}

/// The first `event` strictly after the query's reference instant.
pub fn compute_next(query: &Query, event: SolarEvent) -> Result<DateTime<Tz>, SolarError> {
    let coordinates = query.coordinates()?;
    next_event(coordinates, event, &query.local_now())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn log_query(query: &Query, debug_enabled: bool, events: &[SolarEvent]) {
    log_version!();
    log_block_start!("Location: {:.4}°, {:.4}°", query.latitude, query.longitude);
    log_timezone(query.timezone, query.now);

    if debug_enabled && let Ok(coordinates) = query.coordinates() {
        for event in events {
            log_solar_debug_info(coordinates, query.date, *event);
        }
    }
}
