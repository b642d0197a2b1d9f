//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! All three lines are defined from the first position because the EMAs are.
//! Early values carry heavy seed bias; crossovers inside the first `slow`
//! bars are not meaningful.

use crate::domain::indicator::ema::Ema;
use crate::domain::indicator::{run, Indicator, IndicatorSeries, IndicatorType};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub indicator_type: IndicatorType,
    pub line: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
        }
    }
}

impl Indicator for Macd {
    type Input = f64;
    type Output = MacdPoint;

    fn next(&mut self, value: f64) -> Option<MacdPoint> {
        let fast = self.fast.next(value)?;
        let slow = self.slow.next(value)?;
        let line = fast - slow;
        let signal = self.signal.next(line)?;
        Some(MacdPoint {
            line,
            signal,
            histogram: line - signal,
        })
    }
}

pub fn calculate_macd(
    values: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdSeries {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };
    let points = run(Macd::new(fast, slow, signal_period), values.iter().copied());

    let line = points.iter().map(|p| p.map(|p| p.line)).collect();
    let signal = points.iter().map(|p| p.map(|p| p.signal)).collect();
    let histogram = points.iter().map(|p| p.map(|p| p.histogram)).collect();

    MacdSeries {
        indicator_type,
        line: IndicatorSeries::new(indicator_type, line),
        signal: IndicatorSeries::new(indicator_type, signal),
        histogram: IndicatorSeries::new(indicator_type, histogram),
    }
}

pub fn calculate_macd_default(values: &[f64]) -> MacdSeries {
    calculate_macd(values, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::calculate_ema;
    use approx::assert_relative_eq;

    fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn macd_defined_from_first_position() {
        let series = calculate_macd_default(&rising(40));
        assert!(series.line.values.iter().all(Option::is_some));
        assert!(series.signal.values.iter().all(Option::is_some));
        assert_eq!(series.line.get(0), Some(0.0));
        assert_eq!(series.signal.get(0), Some(0.0));
    }

    #[test]
    fn macd_histogram_equals_line_minus_signal() {
        let series = calculate_macd_default(&rising(40));
        for i in 0..40 {
            let line = series.line.get(i).unwrap();
            let signal = series.signal.get(i).unwrap();
            assert_eq!(series.histogram.get(i), Some(line - signal));
        }
    }

    #[test]
    fn macd_line_is_ema_fast_minus_ema_slow() {
        let closes = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];
        let series = calculate_macd(&closes, 3, 5, 2);

        let ema_fast = calculate_ema(&closes, 3);
        let ema_slow = calculate_ema(&closes, 5);

        for i in 0..closes.len() {
            let expected = ema_fast.get(i).unwrap() - ema_slow.get(i).unwrap();
            assert_eq!(series.line.get(i), Some(expected), "line mismatch at {}", i);
        }
    }

    #[test]
    fn macd_signal_is_ema_of_line() {
        let closes = [10.0, 12.0, 11.0, 15.0, 14.0, 18.0, 17.0];
        let series = calculate_macd(&closes, 2, 4, 3);
        let line: Vec<f64> = series.line.values.iter().map(|v| v.unwrap()).collect();
        let expected = calculate_ema(&line, 3);
        assert_eq!(series.signal.values, expected.values);
    }

    #[test]
    fn macd_rising_series_line_above_signal() {
        let series = calculate_macd_default(&rising(60));
        let last = series.histogram.last().unwrap();
        assert!(last > 0.0);
        assert_relative_eq!(
            series.line.last().unwrap() - series.signal.last().unwrap(),
            last
        );
    }

    #[test]
    fn macd_flat_series_is_zero() {
        let series = calculate_macd(&[100.0; 10], 3, 6, 4);
        for i in 0..10 {
            assert_eq!(series.line.get(i), Some(0.0));
            assert_eq!(series.signal.get(i), Some(0.0));
        }
    }

    #[test]
    fn macd_indicator_type() {
        let series = calculate_macd(&[100.0, 101.0, 102.0], 5, 10, 3);
        assert_eq!(
            series.indicator_type,
            IndicatorType::Macd {
                fast: 5,
                slow: 10,
                signal: 3
            }
        );
    }

    #[test]
    fn macd_zero_period() {
        let closes = [100.0, 101.0, 102.0];
        assert_eq!(calculate_macd(&closes, 0, 26, 9).line.values, vec![None; 3]);
        assert_eq!(calculate_macd(&closes, 12, 0, 9).line.values, vec![None; 3]);
        assert_eq!(calculate_macd(&closes, 12, 26, 0).signal.values, vec![None; 3]);
    }

    #[test]
    fn macd_streaming_matches_batch() {
        let closes = [10.0, 12.5, 11.0, 15.25, 14.0, 18.0, 17.5, 16.0];
        let batch = calculate_macd(&closes, 3, 5, 2);
        let mut macd = Macd::new(3, 5, 2);
        for (i, c) in closes.iter().enumerate() {
            let point = macd.next(*c).unwrap();
            assert_eq!(Some(point.line), batch.line.get(i));
            assert_eq!(Some(point.signal), batch.signal.get(i));
            assert_eq!(Some(point.histogram), batch.histogram.get(i));
        }
    }

    #[test]
    fn macd_default_constants() {
        assert_eq!(DEFAULT_FAST, 12);
        assert_eq!(DEFAULT_SLOW, 26);
        assert_eq!(DEFAULT_SIGNAL, 9);
    }
}
