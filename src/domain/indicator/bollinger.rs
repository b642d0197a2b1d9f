//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is the sample standard deviation (divides by N-1) over exactly the
//! window the middle band averages.
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) positions are undefined, all three bands together.

use crate::domain::indicator::stddev::{DeviationKind, StdDev};
use crate::domain::indicator::{run, Indicator, IndicatorSeries, IndicatorType};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub indicator_type: IndicatorType,
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    deviation: StdDev,
    multiplier: f64,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self {
            deviation: StdDev::new(period, DeviationKind::Sample),
            multiplier,
        }
    }
}

impl Indicator for Bollinger {
    type Input = f64;
    type Output = BollingerBands;

    fn next(&mut self, value: f64) -> Option<BollingerBands> {
        self.deviation.push(value);
        let (middle, sd) = self.deviation.mean_and_deviation()?;
        Some(BollingerBands {
            upper: middle + self.multiplier * sd,
            middle,
            lower: middle - self.multiplier * sd,
        })
    }
}

pub fn calculate_bollinger(values: &[f64], period: usize, multiplier: f64) -> BollingerSeries {
    let indicator_type = IndicatorType::bollinger(period, multiplier);
    let bands = run(Bollinger::new(period, multiplier), values.iter().copied());

    let upper = bands.iter().map(|b| b.map(|b| b.upper)).collect();
    let middle = bands.iter().map(|b| b.map(|b| b.middle)).collect();
    let lower = bands.iter().map(|b| b.map(|b| b.lower)).collect();

    BollingerSeries {
        indicator_type,
        upper: IndicatorSeries::new(indicator_type, upper),
        middle: IndicatorSeries::new(indicator_type, middle),
        lower: IndicatorSeries::new(indicator_type, lower),
    }
}
