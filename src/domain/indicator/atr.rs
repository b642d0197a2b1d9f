//! Average True Range.
//!
//! TR[0] = high - low (no previous close), TR[i] = max(H-L, |H-C[i-1]|, |L-C[i-1]|).
//! ATR(n) = SMA(n) of TR, so the first (n-1) positions are undefined.

use crate::domain::indicator::sma::Sma;
use crate::domain::indicator::{run, Indicator, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::PriceBar;

#[derive(Debug, Clone)]
pub struct Atr {
    prev_close: Option<f64>,
    average: Sma,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            prev_close: None,
            average: Sma::new(period),
        }
    }
}

impl Indicator for Atr {
    /// (high, low, close)
    type Input = (f64, f64, f64);
    type Output = f64;

    fn next(&mut self, (high, low, close): (f64, f64, f64)) -> Option<f64> {
        let tr = match self.prev_close.replace(close) {
            None => high - low,
            Some(prev_close) => true_range(high, low, prev_close),
        };
        self.average.next(tr)
    }
}

pub(crate) fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

pub fn calculate_atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> IndicatorSeries {
    let inputs = high
        .iter()
        .zip(low)
        .zip(close)
        .map(|((&h, &l), &c)| (h, l, c));
    IndicatorSeries::new(IndicatorType::Atr(period), run(Atr::new(period), inputs))
}

/// ATR straight from bars.
pub fn calculate_atr_bars(bars: &[PriceBar], period: usize) -> IndicatorSeries {
    let inputs = bars.iter().map(|b| (b.high, b.low, b.close));
    IndicatorSeries::new(IndicatorType::Atr(period), run(Atr::new(period), inputs))
}
