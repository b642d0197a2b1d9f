#![allow(dead_code)]

use barsignal::domain::error::SignalError;
pub use barsignal::domain::ohlcv::PriceBar;
use barsignal::domain::series::PriceSeries;
use barsignal::ports::data_port::DataPort;
use std::collections::BTreeMap;
use std::io::Write;

pub const DAY_MS: i64 = 86_400_000;
pub const START_MS: i64 = 1_704_067_200_000; // 2024-01-01T00:00:00Z

pub struct MockDataPort {
    pub data: BTreeMap<String, Vec<PriceBar>>,
    pub errors: BTreeMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_series(&self, symbol: &str) -> Result<PriceSeries, SignalError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SignalError::Data {
                reason: reason.clone(),
            });
        }
        PriceSeries::new(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, SignalError> {
        Ok(self.data.keys().cloned().collect())
    }
}

/// Daily bar with a 2.0 range around the close.
pub fn make_bar(day: i64, close: f64) -> PriceBar {
    PriceBar {
        timestamp: START_MS + day * DAY_MS,
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1000.0,
    }
}

pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i as i64, c))
        .collect()
}

pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    PriceSeries::new(bars_from_closes(closes)).unwrap()
}

/// Closes that swing around `base` so every strategy sees both directions.
pub fn oscillating_closes(count: usize, base: f64, amplitude: f64) -> Vec<f64> {
    (0..count)
        .map(|i| base + amplitude * (i as f64 * 0.35).sin() + (i % 3) as f64 * 0.1)
        .collect()
}

pub fn bars_csv(bars: &[PriceBar]) -> String {
    let mut out = String::from("timestamp,open,high,low,close,volume\n");
    for b in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.timestamp, b.open, b.high, b.low, b.close, b.volume
        ));
    }
    out
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
