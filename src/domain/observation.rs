//! Price observations before and after timestamp normalization.

use serde::Serialize;

/// A date as delivered by the history source.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDate {
    /// ISO-8601 date or date-time string.
    Iso(String),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// An already-normalized instant (milliseconds since the Unix epoch).
    Instant(f64),
}

impl RawDate {
    /// Classifies free text: all-digit values (optionally negative) are epoch
    /// milliseconds, anything else is left for ISO-8601 parsing.
    pub fn from_text(value: &str) -> Self {
        let value = value.trim();
        let digits = value.strip_prefix('-').unwrap_or(value);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(ms) = value.parse::<i64>() {
                return RawDate::EpochMillis(ms);
            }
        }
        RawDate::Iso(value.to_string())
    }
}

impl std::fmt::Display for RawDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawDate::Iso(s) => write!(f, "{}", s),
            RawDate::EpochMillis(ms) => write!(f, "{}", ms),
            RawDate::Instant(t) => write!(f, "{}", t),
        }
    }
}

/// One priced period as fetched, date not yet normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub date: RawDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<u64>,
}

impl RawObservation {
    /// Close-only observation, as produced by value series such as portfolio totals.
    pub fn close_only(date: RawDate, close: f64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }
}

/// Ordered history for one ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    pub symbol: String,
    pub observations: Vec<RawObservation>,
}

impl RawSeries {
    pub fn new(symbol: impl Into<String>, observations: Vec<RawObservation>) -> Self {
        Self {
            symbol: symbol.into(),
            observations,
        }
    }
}

/// One priced instant with a normalized timestamp.
///
/// `timestamp` is milliseconds since the Unix epoch; `NaN` marks a date that
/// could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub timestamp: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl Observation {
    pub fn is_valid_instant(&self) -> bool {
        self.timestamp.is_finite()
    }

    /// low <= open, close <= high. Vacuously true unless all four prices are present.
    pub fn is_consistent(&self) -> bool {
        match (self.open, self.high, self.low) {
            (Some(open), Some(high), Some(low)) => {
                low <= open && low <= self.close && open <= high && self.close <= high
            }
            _ => true,
        }
    }
}
