//! Timestamp normalization.
//!
//! Every observation date becomes milliseconds since the Unix epoch as an `f64`.
//! Dates that cannot be parsed become `NaN` at the same index and are reported
//! in [`NormalizedSeries::invalid_dates`]; nothing is dropped.
//!
//! Calendar arithmetic is UTC throughout. A date-only string is midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::domain::error::InvalidDateError;
use crate::domain::observation::{Observation, RawDate, RawObservation, RawSeries};

/// Sentinel instant for an unparseable date.
pub const INVALID_INSTANT: f64 = f64::NAN;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    pub symbol: String,
    pub observations: Vec<Observation>,
    pub invalid_dates: Vec<InvalidDateError>,
}

pub fn normalize(series: &RawSeries) -> NormalizedSeries {
    let mut observations = Vec::with_capacity(series.observations.len());
    let mut invalid_dates = Vec::new();

    for (index, raw) in series.observations.iter().enumerate() {
        let timestamp = match to_instant(&raw.date) {
            Some(t) => t,
            None => {
                invalid_dates.push(InvalidDateError {
                    index,
                    raw: raw.date.to_string(),
                });
                INVALID_INSTANT
            }
        };
        observations.push(with_timestamp(raw, timestamp));
    }

    NormalizedSeries {
        symbol: series.symbol.clone(),
        observations,
        invalid_dates,
    }
}

fn with_timestamp(raw: &RawObservation, timestamp: f64) -> Observation {
    Observation {
        timestamp,
        open: raw.open,
        high: raw.high,
        low: raw.low,
        close: raw.close,
        volume: raw.volume,
    }
}

/// Converts a single raw date, `None` when it cannot be parsed.
pub fn to_instant(date: &RawDate) -> Option<f64> {
    match date {
        RawDate::Iso(s) => parse_iso(s),
        RawDate::EpochMillis(ms) => Some(*ms as f64),
        RawDate::Instant(t) if t.is_finite() => Some(*t),
        RawDate::Instant(_) => None,
    }
}

/// Parses an ISO-8601 date or date-time. Strings without an offset are read as UTC.
pub fn parse_iso(input: &str) -> Option<f64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis() as f64);
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc().timestamp_millis() as f64);
        }
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis() as f64)
}

/// UTC calendar date-time for an instant; `None` for the sentinel or out-of-range values.
pub fn to_datetime(instant: f64) -> Option<DateTime<Utc>> {
    if !instant.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(instant.floor() as i64)
}
