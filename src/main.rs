//! Main application entry point.
//!
//! Parses the command line, applies the global flags (`--config`, `--json`
//! silencing the logger) and dispatches to the command handlers. Errors are
//! reported once and turned into a non-zero exit code.

use anyhow::Result;

use limelight::args::{self, CliAction, ParsedArgs};
use limelight::commands::{self, ReportedError};
use limelight::config;
use limelight::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use limelight::logger::Log;
use limelight::{log_end, log_error_exit};

fn main() {
    let parsed_args = ParsedArgs::from_env();
    let json = parsed_args.action.wants_json();

    // stdout carries only the JSON document
    if json {
        Log::set_enabled(false);
    }

    let exit_code = match run(parsed_args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) if e.downcast_ref::<ReportedError>().is_some() => EXIT_FAILURE,
        Err(e) => {
            if json {
                eprintln!("error: {e:#}");
            } else {
                log_error_exit!("{e:#}");
                log_end!();
            }
            EXIT_FAILURE
        }
    };

    std::process::exit(exit_code);
}

fn run(parsed_args: ParsedArgs) -> Result<()> {
    let ParsedArgs {
        action,
        debug_enabled,
        config_dir,
    } = parsed_args;

    match action {
        CliAction::ShowVersion => {
            args::display_version_info();
            return Ok(());
        }
        CliAction::ShowHelp => {
            args::display_help();
            return Ok(());
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            anyhow::bail!("Invalid arguments");
        }
        CliAction::Help { command } => {
            commands::help::run_help_command(command.as_deref());
            return Ok(());
        }
        _ => {}
    }

    config::set_config_dir(config_dir)?;
    let config_path = config::get_config_path()?;

    match action {
        CliAction::Event { event, options } => {
            commands::sun::handle_event_command(event, &options, &config_path, debug_enabled)
        }
        CliAction::Times { options } => {
            commands::sun::handle_times_command(&options, &config_path, debug_enabled)
        }
        CliAction::Next { event, options } => {
            commands::sun::handle_next_command(event, &options, &config_path, debug_enabled)
        }
        CliAction::LocationShow => commands::location::handle_show_command(&config_path),
        CliAction::LocationSet {
            latitude,
            longitude,
        } => commands::location::handle_set_command(&config_path, latitude, longitude),
        CliAction::LocationTimezone { timezone } => {
            commands::location::handle_timezone_command(&config_path, timezone)
        }
        CliAction::ShowVersion
        | CliAction::ShowHelp
        | CliAction::ShowHelpDueToError
        | CliAction::Help { .. } => Ok(()),
    }
}
