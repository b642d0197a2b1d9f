//! Technical indicator implementations.
//!
//! Every indicator is a small streaming state implementing [`Indicator`]; the
//! `calculate_*` batch functions feed a whole series through a fresh state.
//! Batch and incremental evaluation therefore run the exact same arithmetic
//! and agree bit for bit.
//!
//! This module provides types for representing indicator output:
//! - `IndicatorType`: indicator identity + parameters (serves as HashMap key)
//! - `IndicatorSeries`: optional values aligned 1:1 with the input bars
//! - `IndicatorOutput`: single or multi-line output of one indicator
//! - `IndicatorField`: which line of a multi-line output to read

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod mfi;
pub mod momentum;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod stddev;

pub use atr::{calculate_atr, Atr};
pub use bollinger::{calculate_bollinger, Bollinger, BollingerBands, BollingerSeries};
pub use ema::{calculate_ema, Ema};
pub use macd::{calculate_macd, Macd, MacdPoint, MacdSeries};
pub use mfi::{calculate_mfi, Mfi};
pub use momentum::{calculate_momentum, Momentum};
pub use rsi::{calculate_rsi, Rsi};
pub use sma::{calculate_sma, Sma};
pub use stddev::{calculate_stddev, DeviationKind, StdDev};

use std::fmt;

/// A streaming indicator: consumes one input per bar and yields the value at
/// that bar, or `None` while the warm-up region lasts.
pub trait Indicator {
    type Input;
    type Output;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output>;
}

/// Run `indicator` over every input, collecting one output per input.
pub fn run<I, T>(mut indicator: I, inputs: T) -> Vec<Option<I::Output>>
where
    I: Indicator,
    T: IntoIterator<Item = I::Input>,
{
    inputs.into_iter().map(|x| indicator.next(x)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Atr(usize),
    Stddev(usize),
    Mfi(usize),
    Momentum(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_bits: u64,
    },
}

impl IndicatorType {
    /// Bollinger identity keyed on the exact bit pattern of the multiplier.
    pub fn bollinger(period: usize, multiplier: f64) -> Self {
        IndicatorType::Bollinger {
            period,
            stddev_mult_bits: multiplier.to_bits(),
        }
    }

    /// Index of the first position that can hold a value, or `None` when the
    /// parameters leave the whole output undefined.
    pub fn first_defined_index(&self) -> Option<usize> {
        match *self {
            IndicatorType::Sma(n) | IndicatorType::Atr(n) => n.checked_sub(1),
            IndicatorType::Stddev(n) => (n >= 2).then(|| n - 1),
            IndicatorType::Bollinger { period, .. } => (period >= 2).then(|| period - 1),
            IndicatorType::Rsi(n) | IndicatorType::Mfi(n) | IndicatorType::Momentum(n) => {
                (n > 0).then_some(n)
            }
            IndicatorType::Ema(n) => (n > 0).then_some(0),
            IndicatorType::Macd { fast, slow, signal } => {
                (fast > 0 && slow > 0 && signal > 0).then_some(0)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorField {
    Value,
    MacdLine,
    MacdSignal,
    MacdHistogram,
    BollingerUpper,
    BollingerMiddle,
    BollingerLower,
}

/// Optional values aligned 1:1 with the bars they were computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(indicator_type: IndicatorType, values: Vec<Option<f64>>) -> Self {
        Self {
            indicator_type,
            values,
        }
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the first defined value, if any.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

/// The computed output of one indicator.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorOutput {
    Simple(IndicatorSeries),
    Macd(MacdSeries),
    Bollinger(BollingerSeries),
}

impl IndicatorOutput {
    /// Value of `field` at `index`; `None` when undefined or when the field
    /// does not belong to this output shape.
    pub fn value(&self, field: IndicatorField, index: usize) -> Option<f64> {
        match (self, field) {
            (IndicatorOutput::Simple(s), IndicatorField::Value) => s.get(index),
            (IndicatorOutput::Macd(m), IndicatorField::MacdLine) => m.line.get(index),
            (IndicatorOutput::Macd(m), IndicatorField::MacdSignal) => m.signal.get(index),
            (IndicatorOutput::Macd(m), IndicatorField::MacdHistogram) => m.histogram.get(index),
            (IndicatorOutput::Bollinger(b), IndicatorField::BollingerUpper) => b.upper.get(index),
            (IndicatorOutput::Bollinger(b), IndicatorField::BollingerMiddle) => b.middle.get(index),
            (IndicatorOutput::Bollinger(b), IndicatorField::BollingerLower) => b.lower.get(index),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndicatorOutput::Simple(s) => s.len(),
            IndicatorOutput::Macd(m) => m.line.len(),
            IndicatorOutput::Bollinger(b) => b.middle.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Atr(period) => write!(f, "ATR({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
            IndicatorType::Mfi(period) => write!(f, "MFI({})", period),
            IndicatorType::Momentum(period) => write!(f, "MOMENTUM({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_bits,
            } => {
                let mult = f64::from_bits(*stddev_mult_bits);
                write!(f, "BOLLINGER({},{})", period, mult)
            }
        }
    }
}

impl fmt::Display for IndicatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndicatorField::Value => "value",
            IndicatorField::MacdLine => "line",
            IndicatorField::MacdSignal => "signal",
            IndicatorField::MacdHistogram => "histogram",
            IndicatorField::BollingerUpper => "upper",
            IndicatorField::BollingerMiddle => "middle",
            IndicatorField::BollingerLower => "lower",
        };
        f.write_str(name)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display_sma() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "SMA(20)");
    }

    #[test]
    fn indicator_type_display_macd() {
        let macd = IndicatorType::Macd {
            fast: 12,
            slow: 26,
            signal: 9,
        };
        assert_eq!(macd.to_string(), "MACD(12,26,9)");
    }

    #[test]
    fn indicator_type_display_bollinger() {
        assert_eq!(IndicatorType::bollinger(20, 2.0).to_string(), "BOLLINGER(20,2)");
        assert_eq!(IndicatorType::bollinger(20, 2.5).to_string(), "BOLLINGER(20,2.5)");
    }

    #[test]
    fn indicator_type_hash_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        let rsi14 = IndicatorType::Rsi(14);
        let mfi14 = IndicatorType::Mfi(14);

        map.insert(rsi14, "rsi");
        map.insert(mfi14, "mfi");

        assert_eq!(map.get(&IndicatorType::Rsi(14)), Some(&"rsi"));
        assert_eq!(map.get(&IndicatorType::Mfi(14)), Some(&"mfi"));
        assert_eq!(map.get(&IndicatorType::Rsi(7)), None);
    }

    #[test]
    fn series_accessors() {
        let series =
            IndicatorSeries::new(IndicatorType::Sma(2), vec![None, Some(1.5), Some(2.5)]);
        assert_eq!(series.get(0), None);
        assert_eq!(series.get(1), Some(1.5));
        assert_eq!(series.get(9), None);
        assert_eq!(series.last(), Some(2.5));
        assert_eq!(series.first_defined(), Some(1));
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn output_value_rejects_foreign_field() {
        let output = IndicatorOutput::Simple(IndicatorSeries::new(
            IndicatorType::Rsi(2),
            vec![Some(40.0)],
        ));
        assert_eq!(output.value(IndicatorField::Value, 0), Some(40.0));
        assert_eq!(output.value(IndicatorField::MacdLine, 0), None);
    }

    #[test]
    fn first_defined_index_matches_computed_series() {
        use crate::domain::indicator_helpers::compute_indicator;
        use crate::domain::series::PriceSeries;

        let prices: Vec<f64> = (0..40).map(|i| 50.0 + (i % 7) as f64).collect();
        let series = PriceSeries::new(test_support::make_bars(&prices)).unwrap();
        let types = [
            IndicatorType::Sma(5),
            IndicatorType::Ema(5),
            IndicatorType::Rsi(5),
            IndicatorType::Atr(5),
            IndicatorType::Stddev(5),
            IndicatorType::Mfi(5),
            IndicatorType::Momentum(5),
            IndicatorType::Macd {
                fast: 3,
                slow: 6,
                signal: 2,
            },
            IndicatorType::bollinger(5, 2.0),
        ];
        for t in types {
            let field = match t {
                IndicatorType::Macd { .. } => IndicatorField::MacdSignal,
                IndicatorType::Bollinger { .. } => IndicatorField::BollingerLower,
                _ => IndicatorField::Value,
            };
            let output = compute_indicator(&series, t);
            let first = (0..output.len()).find(|&i| output.value(field, i).is_some());
            assert_eq!(first, t.first_defined_index(), "{}", t);
        }
    }

    #[test]
    fn first_defined_index_for_degenerate_windows() {
        assert_eq!(IndicatorType::Sma(0).first_defined_index(), None);
        assert_eq!(IndicatorType::Stddev(1).first_defined_index(), None);
        assert_eq!(IndicatorType::bollinger(1, 2.0).first_defined_index(), None);
        assert_eq!(IndicatorType::Rsi(0).first_defined_index(), None);
    }

    #[test]
    fn run_collects_one_output_per_input() {
        let out = run(Sma::new(2), [1.0, 2.0, 3.0]);
        assert_eq!(out, vec![None, Some(1.5), Some(2.5)]);
    }
}
