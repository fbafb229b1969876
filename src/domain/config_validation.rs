//! Configuration validation.
//!
//! Checks the `[chart]`, `[data]` and `[search]` sections and turns `[chart]`
//! into [`ChartParams`].

use crate::domain::axis::DEFAULT_TICK_COUNT;
use crate::domain::chart::ChartParams;
use crate::domain::error::ChartError;
use crate::domain::moving_average::DEFAULT_PERIOD;
use crate::ports::config_port::ConfigPort;

pub fn validate_chart_config(config: &dyn ConfigPort) -> Result<(), ChartError> {
    chart_params_from_config(config)?;
    validate_path(config, "data", "path")?;
    validate_path(config, "search", "recent_file")?;
    Ok(())
}

/// Reads `[chart] period, tick_count, max_points`, falling back to defaults for absent keys.
pub fn chart_params_from_config(config: &dyn ConfigPort) -> Result<ChartParams, ChartError> {
    let period = read_count(config, "chart", "period", DEFAULT_PERIOD, 1)?;
    let tick_count = read_count(config, "chart", "tick_count", DEFAULT_TICK_COUNT, 2)?;
    let max_points = if config.has_key("chart", "max_points") {
        Some(read_count(config, "chart", "max_points", 0, 2)?)
    } else {
        None
    };

    Ok(ChartParams {
        period,
        tick_count,
        max_points,
    })
}

fn read_count(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
    minimum: usize,
) -> Result<usize, ChartError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(default);
    };
    let value = raw.trim().parse::<i64>().map_err(|_| ChartError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("{} must be an integer", key),
    })?;

    if value < minimum as i64 {
        return Err(ChartError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{} must be at least {}", key, minimum),
        });
    }
    Ok(value as usize)
}

/// A path key may be absent, but not blank.
fn validate_path(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), ChartError> {
    if let Some(path) = config.get_string(section, key) {
        if path.trim().is_empty() {
            return Err(ChartError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("{} must not be empty", key),
            });
        }
    }
    Ok(())
}
