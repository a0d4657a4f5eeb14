//! Writing the coordinate store.
//!
//! Files are rendered with the `ConfigBuilder` so they stay readable with
//! aligned comments, and are replaced atomically so a crash mid-write never
//! leaves a truncated store behind.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::fs;
use std::io::Write;
use std::path::Path;

use super::Config;
use super::loading::load_from_path;
use super::validation::validate_config;
use crate::geo::Coordinates;
use crate::utils::private_path;

/// Validate and write `config` to `path`.
///
/// The parent directory is created if needed. The content goes to a temporary
/// file in the same directory first and is then renamed over `path`.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    validate_config(config).context("Refusing to save invalid configuration")?;

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).context("Failed to create config directory")?;

    let content = render(config);

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", private_path(parent)))?;
    temp.write_all(content.as_bytes())
        .context("Failed to write temporary config file")?;
    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace config at {}", private_path(path)))?;

    Ok(())
}

/// Store new coordinates, keeping every other setting.
pub fn update_coordinates(path: &Path, coordinates: Coordinates) -> Result<()> {
    let mut config = load_from_path(path)?.unwrap_or_default();
    config.latitude = Some(coordinates.latitude());
    config.longitude = Some(coordinates.longitude());
    save_to_path(&config, path)?;

    log_block_start!("Updated location in {}", private_path(path));
    log_indented!("Latitude: {}", coordinates.latitude());
    log_indented!("Longitude: {}", coordinates.longitude());
    Ok(())
}

/// Store (or clear) the presentation timezone, keeping every other setting.
pub fn update_timezone(path: &Path, timezone: Option<Tz>) -> Result<()> {
    let mut config = load_from_path(path)?.unwrap_or_default();
    config.timezone = timezone.map(|tz| tz.name().to_string());
    save_to_path(&config, path)?;

    match timezone {
        Some(tz) => log_block_start!("Timezone set to {}", tz.name()),
        None => log_block_start!("Timezone cleared; using the location's timezone"),
    }
    Ok(())
}

fn render(config: &Config) -> String {
    let mut builder = ConfigBuilder::new();

    if let (Some(lat), Some(lon)) = (config.latitude, config.longitude) {
        builder = builder
            .add_section("Location")
            .add_setting(
                "latitude",
                &format!("{lat:?}"),
                "Geographic latitude (-90 to 90)",
            )
            .add_setting(
                "longitude",
                &format!("{lon:?}"),
                "Geographic longitude (-180 to 180)",
            );
    }

    if let Some(tz) = &config.timezone {
        builder = builder.add_section("Presentation").add_setting(
            "timezone",
            &format!("\"{tz}\""),
            "IANA timezone for displayed times",
        );
    }

    let mut content = builder.build();
    content.push('\n');
    content
}

struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

#[derive(Clone)]
struct ConfigEntry {
    content: String,
    entry_type: EntryType,
}

#[derive(Clone)]
enum EntryType {
    Section,
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry {
            content: format!("#[{title}]"),
            entry_type: EntryType::Section,
        });
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        let line = format!("{key} = {value}");
        self.entries.push(ConfigEntry {
            content: line.clone(),
            entry_type: EntryType::Setting {
                line,
                comment: format!("# {comment}"),
            },
        });
        self
    }

    fn build(self) -> String {
        // Align all comments one space past the longest setting line
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match &entry.entry_type {
                EntryType::Setting { line, .. } => Some(line.len()),
                EntryType::Section => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry.entry_type {
                EntryType::Section => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(entry.content);
                    first_section = false;
                }
                EntryType::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}
