//! Help command implementation for limelight.
//!
//! Dispatches `limelight help [COMMAND]` to the detailed help of one command,
//! or to the command overview.

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = overview)
pub fn run_help_command(command: Option<&str>) {
    match command {
        None => display_general_help(),
        Some("sunrise") | Some("sunset") => display_event_help(),
        Some("times") | Some("t") => display_times_help(),
        Some("next") | Some("n") => display_next_help(),
        Some("location") | Some("l") => display_location_help(),
        Some("help") | Some("h") => display_help_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {unknown}");
            display_general_help();
        }
    }
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("sunrise, sunset          Time of one event on a date");
    log_indented!("times, t                 Both events and the day length");
    log_indented!("next, n <event>          Next sunrise or sunset after now");
    log_indented!("location, l              Show or change the stored location");
    log_indented!("help, h [COMMAND]        Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'limelight help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'limelight --help' to see all options and general usage.");
    log_end!();
}

fn log_query_options() {
    log_block_start!("Options:");
    log_indented!("--date <YYYY-MM-DD>     Calendar date in the output timezone (default: today)");
    log_indented!("--lat <LAT> --lon <LON> Coordinates in degrees instead of the stored location");
    log_indented!("--tz <NAME>             IANA timezone for output (default: configured,");
    log_indented!("                        else the timezone at the coordinates)");
    log_indented!("--at <DATETIME>         Treat this instant as \"now\"");
    log_indented!("                        (YYYY-MM-DD HH:MM:SS in --tz, or RFC 3339)");
    log_indented!("-j, --json              Print a JSON document instead");
}

fn display_event_help() {
    log_version!();
    log_block_start!("sunrise, sunset - Time of one solar event");
    log_block_start!("Usage: limelight sunrise|sunset [OPTIONS]");
    log_query_options();
    log_block_start!("Exit status:");
    log_indented!("1 when the sun does not rise or set that day (polar night/day)");
    log_indented!("or when the coordinates are out of range");
    log_block_start!("Examples:");
    log_indented!("limelight sunset");
    log_indented!("limelight sunrise --date 2024-12-21 --lat 37.7749 --lon -122.4194");
    log_indented!("limelight sunset --tz UTC --json");
    log_end!();
}

fn display_times_help() {
    log_version!();
    log_block_start!("times - Sunrise, sunset and day length for one day");
    log_block_start!("Usage: limelight times [OPTIONS]");
    log_query_options();
    log_block_start!("Examples:");
    log_indented!("limelight times");
    log_indented!("limelight times --date 2024-06-21 --json");
    log_end!();
}

fn display_next_help() {
    log_version!();
    log_block_start!("next - Next occurrence of an event");
    log_block_start!("Usage: limelight next <sunrise|sunset> [OPTIONS]");
    log_indented!("Polar days are skipped; the search covers one year.");
    log_query_options();
    log_block_start!("Examples:");
    log_indented!("limelight next sunset");
    log_indented!("limelight next sunrise --at \"2024-12-21 18:00:00\"");
    log_end!();
}

fn display_location_help() {
    log_version!();
    log_block_start!("location - Show or change the stored location");
    log_block_start!("Usage:");
    log_indented!("limelight location                       Show the stored location");
    log_indented!("limelight location set <LAT> <LON>       Store coordinates in degrees");
    log_indented!("limelight location timezone <NAME|auto>  Set or clear the output timezone");
    log_block_start!("Examples:");
    log_indented!("limelight location set 51.5074 -0.1278");
    log_indented!("limelight location timezone Europe/London");
    log_end!();
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: limelight help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_end!();
}
