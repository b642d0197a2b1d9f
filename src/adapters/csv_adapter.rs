//! CSV file data adapter.
//!
//! One file per symbol, `<dir>/<SYMBOL>.csv`, with a header row naming
//! `timestamp,open,high,low,close,volume` (any column order, case-insensitive).
//! Timestamps may be integer epoch values, RFC 3339 strings or `YYYY-MM-DD`
//! dates; the latter two are converted to epoch milliseconds.

use crate::domain::error::SignalError;
use crate::domain::ohlcv::PriceBar;
use crate::domain::series::PriceSeries;
use crate::ports::data_port::DataPort;
use chrono::{DateTime, NaiveDate};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const COLUMNS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    /// Parse bars from CSV text. Rows are kept in file order.
    pub fn parse_bars(content: &str) -> Result<Vec<PriceBar>, SignalError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr.headers().map_err(|e| SignalError::Data {
            reason: format!("CSV header error: {}", e),
        })?;
        let mut index = [0usize; 6];
        for (slot, name) in index.iter_mut().zip(COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| SignalError::Data {
                    reason: format!("missing {} column", name),
                })?;
        }

        let mut bars = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| SignalError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;
            let row = row + 1;
            let raw_ts = cell(&record, &index, 0, row)?;
            bars.push(PriceBar {
                timestamp: parse_timestamp(raw_ts).ok_or_else(|| SignalError::Data {
                    reason: format!("row {}: invalid timestamp '{}'", row, raw_ts),
                })?,
                open: number(&record, &index, 1, row)?,
                high: number(&record, &index, 2, row)?,
                low: number(&record, &index, 3, row)?,
                close: number(&record, &index, 4, row)?,
                volume: number(&record, &index, 5, row)?,
            });
        }
        Ok(bars)
    }
}

fn cell<'a>(
    record: &'a csv::StringRecord,
    index: &[usize; 6],
    column: usize,
    row: usize,
) -> Result<&'a str, SignalError> {
    record.get(index[column]).ok_or_else(|| SignalError::Data {
        reason: format!("row {}: missing {} value", row, COLUMNS[column]),
    })
}

fn number(
    record: &csv::StringRecord,
    index: &[usize; 6],
    column: usize,
    row: usize,
) -> Result<f64, SignalError> {
    let raw = cell(record, index, column, row)?;
    raw.parse().map_err(|_| SignalError::Data {
        reason: format!("row {}: invalid {} value '{}'", row, COLUMNS[column], raw),
    })
}

/// Integer epoch value, RFC 3339 instant, or calendar date at UTC midnight.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    if let Ok(epoch) = raw.parse::<i64>() {
        return Some(epoch);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

impl DataPort for CsvAdapter {
    fn load_series(&self, symbol: &str) -> Result<PriceSeries, SignalError> {
        let path = self.csv_path(symbol);
        debug!(path = %path.display(), symbol, "reading bars");
        let content = fs::read_to_string(&path).map_err(|e| SignalError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        PriceSeries::new(Self::parse_bars(&content)?)
    }

    fn list_symbols(&self) -> Result<Vec<String>, SignalError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| SignalError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                symbols.push(stem.to_string_lossy().into_owned());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
