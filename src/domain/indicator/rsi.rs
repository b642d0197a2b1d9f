//! RSI (Relative Strength Index) indicator implementation.
//!
//! Average gain/loss are simple means over the last n price changes:
//! - gain = max(delta, 0), loss = max(-delta, 0)
//! - RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! Zero denominators resolve explicitly: avg_loss == 0 with avg_gain > 0 is
//! 100, a window with neither gains nor losses is the neutral 50.
//!
//! Warmup: first n positions are undefined (need n price changes).

use crate::domain::indicator::rolling::RollingWindow;
use crate::domain::indicator::{run, Indicator, IndicatorSeries, IndicatorType};

pub const NEUTRAL: f64 = 50.0;

/// Map positive and negative totals onto the [0, 100] oscillator scale.
pub(crate) fn strength_index(up: f64, down: f64) -> f64 {
    if down == 0.0 {
        if up > 0.0 { 100.0 } else { NEUTRAL }
    } else {
        100.0 - 100.0 / (1.0 + up / down)
    }
}

#[derive(Debug, Clone)]
pub struct Rsi {
    prev: Option<f64>,
    gains: RollingWindow,
    losses: RollingWindow,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            prev: None,
            gains: RollingWindow::new(period),
            losses: RollingWindow::new(period),
        }
    }
}

impl Indicator for Rsi {
    type Input = f64;
    type Output = f64;

    fn next(&mut self, close: f64) -> Option<f64> {
        let prev = self.prev.replace(close)?;
        let delta = close - prev;
        self.gains.push(delta.max(0.0));
        self.losses.push((-delta).max(0.0));

        let avg_gain = self.gains.mean()?;
        let avg_loss = self.losses.mean()?;
        Some(strength_index(avg_gain, avg_loss))
    }
}

pub fn calculate_rsi(values: &[f64], period: usize) -> IndicatorSeries {
    IndicatorSeries::new(
        IndicatorType::Rsi(period),
        run(Rsi::new(period), values.iter().copied()),
    )
}
