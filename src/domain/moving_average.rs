//! Simple moving average over closing prices.
//!
//! MA(n)[i] = sum(C[i-j] for j in 0..n) / n
//! Warmup: first (n-1) points carry no average.
//! A `NaN` close poisons exactly the windows that contain it.

use serde::Serialize;

use crate::domain::error::ChartError;
use crate::domain::observation::Observation;

pub const DEFAULT_PERIOD: usize = 10;

/// An observation with its trailing average, if enough history precedes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedObservation {
    #[serde(flatten)]
    pub observation: Observation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_average: Option<f64>,
}

pub fn calculate_moving_average(
    observations: &[Observation],
    period: usize,
) -> Result<Vec<SmoothedObservation>, ChartError> {
    validate_period(period)?;

    let warmup = period - 1;
    let mut values = Vec::with_capacity(observations.len());

    for (i, obs) in observations.iter().enumerate() {
        let moving_average = if i >= warmup {
            let window = &observations[i - warmup..=i];
            Some(window.iter().map(|o| o.close).sum::<f64>() / period as f64)
        } else {
            None
        };

        values.push(SmoothedObservation {
            observation: obs.clone(),
            moving_average,
        });
    }

    Ok(values)
}

pub fn validate_period(period: usize) -> Result<(), ChartError> {
    if period < 1 {
        return Err(ChartError::invalid_parameter(
            "period",
            "period must be at least 1",
        ));
    }
    Ok(())
}
