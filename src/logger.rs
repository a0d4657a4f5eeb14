//! Structured logging system with visual formatting.
//!
//! Human-readable command output is written as a box-drawing tree on stdout.
//! The logger can be switched off at runtime, which `--json` does so that
//! stdout carries nothing but the JSON document.
//!
//! ## Logging Conventions
//!
//! - **`log_block_start!`**: starts a new block. Prints an empty pipe `┃` for
//!   spacing, then `┣ message`. Follow it with `log_indented!`.
//! - **`log_indented!`**: `┃   message`, nested details of the block.
//! - **`log_pipe!`**: a single empty `┃`, used before `log_warning!`,
//!   `log_info!` or `log_debug!` when they open a block.
//! - **`log_version!`**: `┏ limelight vX.Y.Z ━━╸`, once at startup.
//! - **`log_end!`**: `╹`, once at the end of the output.
//! - **`log_error_exit!`**: closes the tree with `┗[ERROR] message`.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

pub struct Log;

impl Log {
    /// Enable or disable all logger output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }
}

/// Severity tags used by the semantic macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Debug,
    Warning,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info => "\x1b[32mINFO\x1b[0m",
            Level::Debug => "\x1b[32mDEBUG\x1b[0m",
            Level::Warning => "\x1b[33mWARNING\x1b[0m",
            Level::Error => "\x1b[31mERROR\x1b[0m",
        }
    }
}

/// `┣[LEVEL] message`
pub fn tagged(level: Level, message: &str) -> String {
    format!("┣[{}] {message}\n", level.tag())
}

/// `┃` then `┗[ERROR] message`, closing the tree.
pub fn closing_error(message: &str) -> String {
    format!("┃\n┗[{}] {message}\n", Level::Error.tag())
}

// Public function that routes output (needed by macros)
pub fn write_output(text: &str) {
    let mut stdout = std::io::stdout().lock();
    // A closed pipe (`limelight times | head -1`) is not worth a panic
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

// # Logging Macros

/// Log an indented message for sub-items or details within a block.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)*) => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output(&format!("┃   {}\n", format!($($arg)*)));
        }
    }};
}

/// Log a visual pipe separator for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output("┃\n");
        }
    }};
}

/// Log a block start message, initiating a new conceptual block of information.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)*) => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output(&format!("┃\n┣ {}\n", format!($($arg)*)));
        }
    }};
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {{
        if $crate::logger::Log::is_enabled() {
            let version = env!("CARGO_PKG_VERSION");
            $crate::logger::write_output(&format!("┏ limelight v{version} ━━╸\n"));
        }
    }};
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output("╹\n");
        }
    }};
}

/// Log an informational message.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output(&$crate::logger::tagged(
                $crate::logger::Level::Info,
                &format!($($arg)*),
            ));
        }
    }};
}

/// Log a debug message (only emitted by callers when `--debug` is on).
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output(&$crate::logger::tagged(
                $crate::logger::Level::Debug,
                &format!($($arg)*),
            ));
        }
    }};
}

/// Log a warning message.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output(&$crate::logger::tagged(
                $crate::logger::Level::Warning,
                &format!($($arg)*),
            ));
        }
    }};
}

/// Log an error that terminates the tree.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)*) => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output(&$crate::logger::closing_error(&format!($($arg)*)));
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_tagged_line() {
        assert_eq!(
            tagged(Level::Warning, "careful"),
            "┣[\x1b[33mWARNING\x1b[0m] careful\n"
        );
        assert!(tagged(Level::Error, "x").contains("ERROR"));
    }

    #[test]
    fn test_closing_error_ends_the_tree() {
        assert_eq!(
            closing_error("Invalid arguments"),
            "┃\n┗[\x1b[31mERROR\x1b[0m] Invalid arguments\n"
        );
    }

    #[test]
    #[serial]
    fn test_enable_toggle() {
        let original = Log::is_enabled();

        Log::set_enabled(false);
        assert!(!Log::is_enabled());
        // Disabled macros must not touch stdout at all
        log_block_start!("hidden {}", 1);
        log_indented!("hidden");

        Log::set_enabled(true);
        assert!(Log::is_enabled());

        Log::set_enabled(original);
    }
}
