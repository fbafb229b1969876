//! Even downsampling of long histories.
//!
//! Keeps indices floor(k * (len - 1) / (max_points - 1)) for k in 0..max_points,
//! so the first and last elements always survive.

use crate::domain::error::ChartError;

pub fn downsample_evenly<T: Clone>(items: &[T], max_points: usize) -> Result<Vec<T>, ChartError> {
    validate_max_points(max_points)?;
    if items.len() <= max_points {
        return Ok(items.to_vec());
    }

    let last = items.len() - 1;
    let steps = max_points - 1;
    Ok((0..max_points)
        .map(|k| items[k * last / steps].clone())
        .collect())
}

pub fn validate_max_points(max_points: usize) -> Result<(), ChartError> {
    if max_points < 2 {
        return Err(ChartError::invalid_parameter(
            "max_points",
            "max_points must be at least 2",
        ));
    }
    Ok(())
}
