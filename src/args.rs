//! Command-line argument parsing and processing.
//!
//! Global flags (`--debug`, `--config`, `--help`, `--version`) may appear
//! anywhere. The first remaining word selects the command; everything after
//! it belongs to that command.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::constants::DATE_FORMAT;
use crate::geo::SolarEvent;

/// Options shared by the query commands (`sunrise`, `sunset`, `times`, `next`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Calendar date to query; today in the presentation timezone when absent
    pub date: Option<NaiveDate>,
    /// Explicit coordinates overriding the stored location
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Presentation timezone overriding the stored/detected one
    pub timezone: Option<Tz>,
    /// Reference instant replacing the system clock (`--at`)
    pub at: Option<String>,
    pub json: bool,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Sunrise or sunset on one date
    Event {
        event: SolarEvent,
        options: QueryOptions,
    },
    /// Both events for one local day
    Times { options: QueryOptions },
    /// Next occurrence of an event after now
    Next {
        event: SolarEvent,
        options: QueryOptions,
    },
    /// Print the stored location
    LocationShow,
    /// Store new coordinates
    LocationSet { latitude: f64, longitude: f64 },
    /// Store a presentation timezone, or clear it with `auto`
    LocationTimezone { timezone: Option<Tz> },
    /// Detailed help for one command (or the command overview)
    Help { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

impl CliAction {
    /// Whether the command wants machine-readable output.
    pub fn wants_json(&self) -> bool {
        match self {
            CliAction::Event { options, .. }
            | CliAction::Times { options }
            | CliAction::Next { options, .. } => options.json,
            _ => false,
        }
    }
}

/// Result of parsing command-line arguments.
#[derive(Debug, PartialEq)]
pub struct ParsedArgs {
    pub action: CliAction,
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is taken to be the program name and skipped.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut config_dir: Option<String> = None;
        let mut config_error = false;
        let mut rest: Vec<String> = Vec::new();

        let mut i = 0;
        while i < args_vec.len() {
            match args_vec[i].as_str() {
                "--debug" | "-d" => debug_enabled = true,
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--config" | "-c" => {
                    // Parse: --config <directory>
                    match args_vec.get(i + 1) {
                        Some(dir) if !dir.starts_with('-') => {
                            config_dir = Some(dir.clone());
                            i += 1;
                        }
                        _ => {
                            log_warning!(
                                "Missing directory for --config. Usage: --config <directory>"
                            );
                            config_error = true;
                        }
                    }
                }
                _ => rest.push(args_vec[i].clone()),
            }
            i += 1;
        }

        // Version wins over help, help over everything else
        let action = if display_version {
            CliAction::ShowVersion
        } else if display_help {
            CliAction::ShowHelp
        } else if config_error {
            CliAction::ShowHelpDueToError
        } else {
            parse_command(&rest)
        };

        ParsedArgs {
            action,
            debug_enabled,
            config_dir,
        }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

fn parse_command(args: &[String]) -> CliAction {
    let Some(command) = args.first() else {
        // Bare `limelight` reports today's events for the stored location
        return CliAction::Times {
            options: QueryOptions::default(),
        };
    };
    let tail = &args[1..];

    let result = match command.as_str() {
        "sunrise" | "sunset" => {
            let event = if command == "sunrise" {
                SolarEvent::Sunrise
            } else {
                SolarEvent::Sunset
            };
            parse_query_options(tail).map(|options| CliAction::Event { event, options })
        }
        "times" | "t" => parse_query_options(tail).map(|options| CliAction::Times { options }),
        "next" | "n" => parse_next(tail),
        "location" | "l" => parse_location(tail),
        "help" | "h" => {
            if tail.len() > 1 {
                Err("Usage: limelight help [COMMAND]".to_string())
            } else {
                Ok(CliAction::Help {
                    command: tail.first().cloned(),
                })
            }
        }
        unknown if unknown.starts_with('-') => Err(format!("Unknown option: {unknown}")),
        unknown => Err(format!("Unknown command: {unknown}")),
    };

    result.unwrap_or_else(|message| {
        log_warning!("{message}");
        CliAction::ShowHelpDueToError
    })
}

fn parse_next(args: &[String]) -> Result<CliAction, String> {
    let event = match args.first() {
        Some(word) if !word.starts_with('-') => word
            .parse::<SolarEvent>()
            .map_err(|e| format!("{e}. Usage: limelight next <sunrise|sunset>"))?,
        _ => return Err("Missing event. Usage: limelight next <sunrise|sunset>".to_string()),
    };

    let options = parse_query_options(&args[1..])?;
    if options.date.is_some() {
        return Err("'next' searches from now; use --at instead of --date".to_string());
    }

    Ok(CliAction::Next { event, options })
}

fn parse_location(args: &[String]) -> Result<CliAction, String> {
    match args.first().map(String::as_str) {
        None => Ok(CliAction::LocationShow),
        Some("set") => {
            // Values may be negative, so they are never treated as flags
            let [lat, lon] = &args[1..] else {
                return Err(
                    "Expected two values. Usage: limelight location set <LAT> <LON>".to_string(),
                );
            };
            Ok(CliAction::LocationSet {
                latitude: parse_number("latitude", lat)?,
                longitude: parse_number("longitude", lon)?,
            })
        }
        Some("timezone") => {
            let [name] = &args[1..] else {
                return Err(
                    "Expected one value. Usage: limelight location timezone <NAME|auto>"
                        .to_string(),
                );
            };
            let timezone = if name == "auto" {
                None
            } else {
                Some(parse_timezone(name)?)
            };
            Ok(CliAction::LocationTimezone { timezone })
        }
        Some(other) => Err(format!(
            "Unknown location action: {other}. Usage: limelight location [set <LAT> <LON> | timezone <NAME|auto>]"
        )),
    }
}

fn parse_query_options(args: &[String]) -> Result<QueryOptions, String> {
    let mut options = QueryOptions::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--json" | "-j" => options.json = true,
            "--date" | "--lat" | "--lon" | "--tz" | "--at" => {
                // Values are taken verbatim so `--lon -122.4` works
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("Missing value for {flag}"))?;
                match flag {
                    "--date" => {
                        let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
                            format!("Invalid date: '{value}'. Use YYYY-MM-DD")
                        })?;
                        options.date = Some(date);
                    }
                    "--lat" => options.latitude = Some(parse_number("latitude", value)?),
                    "--lon" => options.longitude = Some(parse_number("longitude", value)?),
                    "--tz" => options.timezone = Some(parse_timezone(value)?),
                    _ => options.at = Some(value.clone()),
                }
                i += 1;
            }
            other if other.starts_with('-') => return Err(format!("Unknown option: {other}")),
            other => return Err(format!("Unexpected argument: {other}")),
        }
        i += 1;
    }

    if options.latitude.is_some() != options.longitude.is_some() {
        return Err("--lat and --lon must be given together".to_string());
    }

    Ok(options)
}

fn parse_number(name: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("Invalid {name}: '{value}'"))
}

fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.parse::<Tz>()
        .map_err(|_| format!("Unknown timezone: '{name}'. Use an IANA name such as Europe/London"))
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    log_end!();
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!("{}", env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("limelight [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Show intermediate solar values");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("sunrise, sunset        Time of one event on a date");
    log_indented!("times, t               Both events and day length (default)");
    log_indented!("next, n <event>        Next sunrise or sunset after now");
    log_indented!("location, l            Show or change the stored location");
    log_indented!("help, h [COMMAND]      Show detailed help for a command");
    log_block_start!("Query options:");
    log_indented!("--date <YYYY-MM-DD>    Date to query (default: today)");
    log_indented!("--lat <LAT> --lon <LON> Coordinates instead of the stored location");
    log_indented!("--tz <NAME>            Timezone for displayed times");
    log_indented!("--at <DATETIME>        Use this instant as \"now\"");
    log_indented!("-j, --json             Machine-readable output");
    log_end!();
}
