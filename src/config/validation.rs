//! Configuration validation.

use anyhow::{Context, Result};

use super::Config;
use crate::geo::coordinates::{check_latitude, check_longitude};

/// Reject configurations the solar calculator could not use.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(lat) = config.latitude {
        check_latitude(lat)?;
    }

    if let Some(lon) = config.longitude {
        check_longitude(lon)?;
    }

    match (config.latitude, config.longitude) {
        (Some(_), None) => anyhow::bail!("latitude is set but longitude is missing"),
        (None, Some(_)) => anyhow::bail!("longitude is set but latitude is missing"),
        _ => {}
    }

    config
        .timezone()
        .context("timezone must be a valid IANA name such as \"Europe/London\"")?;

    Ok(())
}
