//! # limelight
//!
//! Sunrise and sunset times for lighting automation.
//!
//! The library holds everything the `limelight` binary does, so it can be
//! tested without spawning processes:
//!
//! - **Calculator**: [`geo::solar`] computes a sunrise or sunset instant for a
//!   latitude, longitude, date and timezone, or reports why there is none
//!   (out-of-range input, polar night, polar day). It is pure and thread-safe.
//! - **Scheduling helpers**: [`geo::times`] anchors events on local calendar
//!   days and finds the next occurrence of an event.
//! - **Collaborators**: [`config`] stores the chosen location, and
//!   [`geo::geocoding`] defines how a place-name resolver plugs in.
//! - **Command line**: [`args`] and [`commands`], with output through the
//!   [`logger`] macros.

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod geo;
pub mod time_source;
pub mod utils;
