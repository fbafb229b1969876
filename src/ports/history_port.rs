//! Price history source port trait.

use crate::domain::error::ChartError;
use crate::domain::observation::RawSeries;

/// Supplies the raw, already range-filtered history for one ticker.
pub trait HistoryPort {
    fn fetch_history(&self, symbol: &str) -> Result<RawSeries, ChartError>;

    fn list_symbols(&self) -> Result<Vec<String>, ChartError>;
}
