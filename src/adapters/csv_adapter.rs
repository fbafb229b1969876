//! CSV file history adapter.
//!
//! One file per ticker, `<base>/<SYMBOL>.csv`, with a header row. `date` and
//! `close` are required; `open`, `high`, `low` and `volume` are optional and may
//! be left empty. Rows are taken in file order. Dates are passed through
//! unparsed so the normalizer can flag bad ones: all-digit values are epoch
//! milliseconds, anything else is treated as ISO-8601.

use crate::domain::error::ChartError;
use crate::domain::observation::{RawDate, RawObservation, RawSeries};
use crate::ports::history_port::HistoryPort;
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

struct Columns {
    date: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: usize,
    volume: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, ChartError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let required = |name: &str| {
            find(name).ok_or_else(|| ChartError::Data {
                reason: format!("missing {} column", name),
            })
        };

        Ok(Self {
            date: required("date")?,
            open: find("open"),
            high: find("high"),
            low: find("low"),
            close: required("close")?,
            volume: find("volume"),
        })
    }
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol.to_uppercase()))
    }

    /// `<SYMBOL>.csv` if present, otherwise any `.csv` whose stem matches ignoring case.
    fn find_csv(&self, symbol: &str) -> Option<PathBuf> {
        let path = self.csv_path(symbol);
        if path.exists() {
            return Some(path);
        }
        let wanted = symbol.to_uppercase();
        self.csv_files()
            .ok()?
            .into_iter()
            .find(|(stem, _)| *stem == wanted)
            .map(|(_, path)| path)
    }

    /// Upper-cased stem and path of every `.csv` file in the base directory.
    fn csv_files(&self) -> Result<Vec<(String, PathBuf)>, ChartError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| ChartError::Data {
            reason: format!("failed to read directory {}: {}", self.base_path.display(), e),
        })?;

        Ok(entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")))
            .filter_map(|path| {
                let stem = path.file_stem()?.to_str()?.to_uppercase();
                Some((stem, path))
            })
            .collect())
    }

    /// Parses CSV text into a series without touching the filesystem.
    pub fn parse(symbol: &str, content: &str) -> Result<RawSeries, ChartError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr.headers().map_err(|e| ChartError::Data {
            reason: format!("CSV header error: {}", e),
        })?;
        let columns = Columns::from_headers(headers)?;

        let mut observations = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| ChartError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;
            observations.push(parse_record(&record, &columns, row + 1)?);
        }

        Ok(RawSeries::new(symbol.to_uppercase(), observations))
    }
}

fn parse_record(record: &StringRecord, columns: &Columns, row: usize) -> Result<RawObservation, ChartError> {
    let date_str = record.get(columns.date).unwrap_or_default();
    let date = RawDate::from_text(date_str);

    let close = parse_price(record, Some(columns.close), "close", row)?.ok_or_else(|| {
        ChartError::Data {
            reason: format!("row {}: missing close value", row),
        }
    })?;

    let volume = match field(record, columns.volume) {
        Some(v) => Some(v.parse::<u64>().map_err(|e| ChartError::Data {
            reason: format!("row {}: invalid volume value: {}", row, e),
        })?),
        None => None,
    };

    Ok(RawObservation {
        date,
        open: parse_price(record, columns.open, "open", row)?,
        high: parse_price(record, columns.high, "high", row)?,
        low: parse_price(record, columns.low, "low", row)?,
        close,
        volume,
    })
}

fn field(record: &StringRecord, column: Option<usize>) -> Option<&str> {
    column
        .and_then(|c| record.get(c))
        .filter(|v| !v.is_empty())
}

fn parse_price(
    record: &StringRecord,
    column: Option<usize>,
    name: &str,
    row: usize,
) -> Result<Option<f64>, ChartError> {
    match field(record, column) {
        Some(v) => v.parse::<f64>().map(Some).map_err(|e| ChartError::Data {
            reason: format!("row {}: invalid {} value: {}", row, name, e),
        }),
        None => Ok(None),
    }
}

impl HistoryPort for CsvAdapter {
    fn fetch_history(&self, symbol: &str) -> Result<RawSeries, ChartError> {
        let path = self.find_csv(symbol).ok_or_else(|| ChartError::NoData {
            symbol: symbol.to_uppercase(),
        })?;
        let content = fs::read_to_string(&path).map_err(|e| ChartError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::parse(symbol, &content)
    }

    fn list_symbols(&self) -> Result<Vec<String>, ChartError> {
        let mut symbols: Vec<String> = self
            .csv_files()?
            .into_iter()
            .map(|(symbol, _)| symbol)
            .collect();

        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}
