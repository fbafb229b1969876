//! Time axis generation.
//!
//! Ticks are evenly spaced between the earliest and latest valid timestamps:
//! tick[k] = min + k * (max - min) / (n - 1)
//! They are not snapped to observation instants.

use serde::Serialize;

use crate::domain::error::ChartError;
use crate::domain::format::date_label;
use crate::domain::label_policy::{spans_multiple_years, LabelGranularity};
use crate::domain::observation::Observation;
use crate::domain::timestamp::INVALID_INSTANT;

pub const DEFAULT_TICK_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    pub min_instant: f64,
    pub max_instant: f64,
    pub tick_count: usize,
    pub ticks: Vec<f64>,
    pub label_granularity: LabelGranularity,
}

impl AxisSpec {
    /// One date label per tick, formatted for this axis' granularity.
    pub fn tick_labels(&self) -> Vec<String> {
        self.ticks
            .iter()
            .map(|&t| date_label(t, self.label_granularity))
            .collect()
    }

    pub fn span(&self) -> f64 {
        self.max_instant - self.min_instant
    }
}

pub fn generate_axis(observations: &[Observation], tick_count: usize) -> Result<AxisSpec, ChartError> {
    validate_tick_count(tick_count)?;
    if observations.is_empty() {
        return Err(ChartError::invalid_parameter(
            "series",
            "cannot build an axis for an empty series",
        ));
    }

    // No readable date at all: every bound and tick is the sentinel.
    let (min_instant, max_instant) =
        instant_bounds(observations).unwrap_or((INVALID_INSTANT, INVALID_INSTANT));

    let ticks = evenly_spaced(min_instant, max_instant, tick_count);
    let label_granularity = LabelGranularity::from_year_qualified(spans_multiple_years(observations));

    Ok(AxisSpec {
        min_instant,
        max_instant,
        tick_count,
        ticks,
        label_granularity,
    })
}

pub fn validate_tick_count(tick_count: usize) -> Result<(), ChartError> {
    if tick_count < 2 {
        return Err(ChartError::invalid_parameter(
            "tick_count",
            "tick_count must be at least 2",
        ));
    }
    Ok(())
}

/// Earliest and latest valid timestamps, skipping `NaN` sentinels.
fn instant_bounds(observations: &[Observation]) -> Option<(f64, f64)> {
    observations
        .iter()
        .filter(|o| o.is_valid_instant())
        .map(|o| o.timestamp)
        .fold(None, |acc, t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
}

fn evenly_spaced(min: f64, max: f64, count: usize) -> Vec<f64> {
    let step = (max - min) / (count - 1) as f64;
    (0..count)
        .map(|k| if k == count - 1 { max } else { min + k as f64 * step })
        .collect()
}
