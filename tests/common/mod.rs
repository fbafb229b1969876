#![allow(dead_code)]

use stockchart::domain::error::ChartError;
pub use stockchart::domain::observation::{RawDate, RawObservation, RawSeries};
use stockchart::domain::timestamp::parse_iso;
use stockchart::ports::history_port::HistoryPort;
use std::collections::HashMap;

pub const DAY_MS: f64 = 86_400_000.0;

pub struct MockHistoryPort {
    pub data: HashMap<String, RawSeries>,
    pub errors: HashMap<String, String>,
}

impl MockHistoryPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, series: RawSeries) -> Self {
        self.data.insert(series.symbol.clone(), series);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl HistoryPort for MockHistoryPort {
    fn fetch_history(&self, symbol: &str) -> Result<RawSeries, ChartError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(ChartError::Data {
                reason: reason.clone(),
            });
        }
        self.data.get(symbol).cloned().ok_or_else(|| ChartError::NoData {
            symbol: symbol.to_string(),
        })
    }

    fn list_symbols(&self) -> Result<Vec<String>, ChartError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn make_obs(date: &str, close: f64) -> RawObservation {
    RawObservation {
        date: RawDate::Iso(date.to_string()),
        open: Some(close - 1.0),
        high: Some(close + 1.0),
        low: Some(close - 2.0),
        close,
        volume: Some(1000),
    }
}

pub fn close_series(symbol: &str, points: &[(&str, f64)]) -> RawSeries {
    RawSeries::new(
        symbol,
        points
            .iter()
            .map(|&(date, close)| RawObservation::close_only(RawDate::Iso(date.to_string()), close))
            .collect(),
    )
}

pub fn instant(date: &str) -> f64 {
    parse_iso(date).unwrap()
}

/// Daily OHLCV bars starting at `start_date`, close rising by one per day.
pub fn generate_series(symbol: &str, start_date: &str, count: usize, start_price: f64) -> RawSeries {
    let start = instant(start_date);
    RawSeries::new(
        symbol,
        (0..count)
            .map(|i| RawObservation {
                date: RawDate::Instant(start + i as f64 * DAY_MS),
                open: Some(start_price + i as f64),
                high: Some(start_price + i as f64 + 1.0),
                low: Some(start_price + i as f64 - 1.0),
                close: start_price + i as f64,
                volume: Some(1000 + i as u64),
            })
            .collect(),
    )
}
