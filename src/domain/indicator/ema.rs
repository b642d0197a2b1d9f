//! Exponential Moving Average.
//!
//! k = 2/(n+1), EMA[0] = V[0], then EMA[i] = V[i]*k + EMA[i-1]*(1-k).
//! Defined from the first position; there is no SMA warm-up seed, so early
//! values lean heavily on the first observation.
//!
//! The recursion is evaluated as EMA[i-1] + k*(V[i] - EMA[i-1]), which keeps a
//! constant input exactly constant.

use crate::domain::indicator::{run, Indicator, IndicatorSeries, IndicatorType};

#[derive(Debug, Clone)]
pub struct Ema {
    k: f64,
    enabled: bool,
    value: Option<f64>,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            k: smoothing_factor(period),
            enabled: period > 0,
            value: None,
        }
    }
}

pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

impl Indicator for Ema {
    type Input = f64;
    type Output = f64;

    fn next(&mut self, input: f64) -> Option<f64> {
        if !self.enabled {
            return None;
        }
        let ema = match self.value {
            None => input,
            Some(prev) => prev + self.k * (input - prev),
        };
        self.value = Some(ema);
        Some(ema)
    }
}

pub fn calculate_ema(values: &[f64], period: usize) -> IndicatorSeries {
    IndicatorSeries::new(
        IndicatorType::Ema(period),
        run(Ema::new(period), values.iter().copied()),
    )
}
