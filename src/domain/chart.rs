//! Chart data assembly.
//!
//! [`build_chart`] is the single entry point used by renderers: it validates
//! parameters, then runs downsampling, timestamp normalization, the moving
//! average, axis generation and the year label policy, in that order. The
//! result is a plain value; calling it twice with the same input yields equal
//! output.

use serde::Serialize;

use crate::domain::axis::{generate_axis, validate_tick_count, AxisSpec, DEFAULT_TICK_COUNT};
use crate::domain::downsample::{downsample_evenly, validate_max_points};
use crate::domain::error::{ChartError, InvalidDateError};
use crate::domain::moving_average::{
    calculate_moving_average, validate_period, SmoothedObservation, DEFAULT_PERIOD,
};
use crate::domain::observation::RawSeries;
use crate::domain::timestamp::normalize;
use crate::domain::tooltip::{format_tooltip, Tooltip};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartParams {
    /// Moving average window.
    pub period: usize,
    pub tick_count: usize,
    /// Downsample the raw history to at most this many points before anything else.
    pub max_points: Option<usize>,
}

impl Default for ChartParams {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            tick_count: DEFAULT_TICK_COUNT,
            max_points: None,
        }
    }
}

impl ChartParams {
    pub fn validate(&self) -> Result<(), ChartError> {
        validate_period(self.period)?;
        validate_tick_count(self.tick_count)?;
        if let Some(max_points) = self.max_points {
            validate_max_points(max_points)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
            None => Some(ValueRange { min: v, max: v }),
            Some(r) => Some(ValueRange {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub symbol: String,
    pub period: usize,
    pub points: Vec<SmoothedObservation>,
    pub axis: AxisSpec,
    /// Over open, low, high, close and moving average.
    pub price_range: Option<ValueRange>,
    /// From zero to the largest volume.
    pub volume_range: Option<ValueRange>,
    /// Indices refer to `points`.
    pub invalid_dates: Vec<InvalidDateError>,
}

impl ChartData {
    pub fn year_qualified(&self) -> bool {
        self.axis.label_granularity.is_year_qualified()
    }

    pub fn tooltip_at(&self, index: usize) -> Option<Tooltip> {
        self.points
            .get(index)
            .map(|p| format_tooltip(p, self.year_qualified()))
    }

    /// Tooltip for the point nearest to `instant`.
    pub fn tooltip_for(&self, instant: f64) -> Option<Tooltip> {
        self.nearest_index(instant).and_then(|i| self.tooltip_at(i))
    }

    /// Index of the point whose timestamp is closest to `instant`.
    ///
    /// An exact match wins; equal distances resolve to the earlier point.
    /// Points with a sentinel timestamp are never selected.
    pub fn nearest_index(&self, instant: f64) -> Option<usize> {
        if instant.is_nan() {
            return None;
        }

        let mut best: Option<(usize, f64)> = None;
        for (i, point) in self.points.iter().enumerate() {
            let t = point.observation.timestamp;
            if !t.is_finite() {
                continue;
            }
            let distance = (t - instant).abs();
            if distance == 0.0 {
                return Some(i);
            }
            match best {
                Some((_, d)) if distance >= d => {}
                _ => best = Some((i, distance)),
            }
        }
        best.map(|(i, _)| i)
    }
}

pub fn build_chart(series: &RawSeries, params: &ChartParams) -> Result<ChartData, ChartError> {
    params.validate()?;

    let sampled;
    let source = match params.max_points {
        Some(max_points) => {
            sampled = RawSeries::new(
                series.symbol.clone(),
                downsample_evenly(&series.observations, max_points)?,
            );
            &sampled
        }
        None => series,
    };

    let normalized = normalize(source);
    let points = calculate_moving_average(&normalized.observations, params.period)?;
    let axis = generate_axis(&normalized.observations, params.tick_count)?;

    let price_range = ValueRange::from_values(points.iter().flat_map(|p| {
        let o = &p.observation;
        [o.open, o.low, o.high, Some(o.close), p.moving_average]
            .into_iter()
            .flatten()
    }));
    let volume_range = points
        .iter()
        .filter_map(|p| p.observation.volume)
        .max()
        .map(|max| ValueRange {
            min: 0.0,
            max: max as f64,
        });

    Ok(ChartData {
        symbol: normalized.symbol,
        period: params.period,
        points,
        axis,
        price_range,
        volume_range,
        invalid_dates: normalized.invalid_dates,
    })
}
