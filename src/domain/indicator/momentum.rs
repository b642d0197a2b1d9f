//! Momentum: V[i] - V[i-n]. Undefined for the first n positions.

use crate::domain::indicator::rolling::RollingWindow;
use crate::domain::indicator::{run, Indicator, IndicatorSeries, IndicatorType};

#[derive(Debug, Clone)]
pub struct Momentum {
    period: usize,
    // current value plus the n before it
    window: RollingWindow,
}

impl Momentum {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            window: RollingWindow::new(period.saturating_add(1)),
        }
    }
}

impl Indicator for Momentum {
    type Input = f64;
    type Output = f64;

    fn next(&mut self, value: f64) -> Option<f64> {
        if self.period == 0 {
            return None;
        }
        self.window.push(value);
        if !self.window.is_full() {
            return None;
        }
        self.window.oldest().map(|past| value - past)
    }
}

pub fn calculate_momentum(values: &[f64], period: usize) -> IndicatorSeries {
    IndicatorSeries::new(
        IndicatorType::Momentum(period),
        run(Momentum::new(period), values.iter().copied()),
    )
}
