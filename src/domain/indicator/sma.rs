//! Simple Moving Average.
//!
//! SMA(n)[i] = mean(V[i-n+1..=i]).
//! Warmup: first (n-1) positions are undefined.

use crate::domain::indicator::rolling::RollingWindow;
use crate::domain::indicator::{run, Indicator, IndicatorSeries, IndicatorType};

#[derive(Debug, Clone)]
pub struct Sma {
    window: RollingWindow,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            window: RollingWindow::new(period),
        }
    }
}

impl Indicator for Sma {
    type Input = f64;
    type Output = f64;

    fn next(&mut self, value: f64) -> Option<f64> {
        self.window.push(value);
        self.window.mean()
    }
}

pub fn calculate_sma(values: &[f64], period: usize) -> IndicatorSeries {
    IndicatorSeries::new(
        IndicatorType::Sma(period),
        run(Sma::new(period), values.iter().copied()),
    )
}
