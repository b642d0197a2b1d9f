//! Standard Deviation indicator.
//!
//! Trailing standard deviation over the same n values an SMA(n) averages.
//! `Sample` divides by (n-1), `Population` by n.
//! STDDEV(n)[i] = sqrt(sum((V[i-j] - SMA(n)[i])^2 for j in 0..n) / d)
//! Warmup: first (n-1) positions are undefined; a sample deviation needs n >= 2.

use crate::domain::indicator::rolling::RollingWindow;
use crate::domain::indicator::{run, Indicator, IndicatorSeries, IndicatorType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviationKind {
    #[default]
    Sample,
    Population,
}

#[derive(Debug, Clone)]
pub struct StdDev {
    window: RollingWindow,
    kind: DeviationKind,
}

impl StdDev {
    pub fn new(period: usize, kind: DeviationKind) -> Self {
        Self {
            window: RollingWindow::new(period),
            kind,
        }
    }

    /// Mean and deviation of the current window, computed in two passes.
    pub(crate) fn mean_and_deviation(&self) -> Option<(f64, f64)> {
        let n = self.window.capacity();
        let denominator = match self.kind {
            DeviationKind::Population => n,
            DeviationKind::Sample => n.checked_sub(1).filter(|d| *d > 0)?,
        };
        let mean = self.window.mean()?;
        if let Some(first) = self.window.oldest() {
            // the mean of a flat window may be off by an ulp
            if self.window.iter().all(|v| v == first) {
                return Some((mean, 0.0));
            }
        }
        let squares: f64 = self
            .window
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum();
        Some((mean, (squares / denominator as f64).sqrt()))
    }

    pub(crate) fn push(&mut self, value: f64) {
        self.window.push(value);
    }
}

impl Indicator for StdDev {
    type Input = f64;
    type Output = f64;

    fn next(&mut self, value: f64) -> Option<f64> {
        self.push(value);
        self.mean_and_deviation().map(|(_, sd)| sd)
    }
}

pub fn calculate_stddev(values: &[f64], period: usize, kind: DeviationKind) -> IndicatorSeries {
    IndicatorSeries::new(
        IndicatorType::Stddev(period),
        run(StdDev::new(period, kind), values.iter().copied()),
    )
}
