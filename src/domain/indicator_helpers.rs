//! Shared helpers for computing indicator sets over a price series.
//!
//! Indicators are independent of each other, so a set is computed as a
//! fan-out over the rayon pool with a single join when the map is collected.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::domain::indicator::{
    calculate_atr, calculate_bollinger, calculate_ema, calculate_macd, calculate_mfi,
    calculate_momentum, calculate_rsi, calculate_sma, calculate_stddev, DeviationKind,
    IndicatorOutput, IndicatorType,
};
use crate::domain::series::PriceSeries;

pub type IndicatorSet = HashMap<IndicatorType, IndicatorOutput>;

/// Compute one indicator over the whole series.
pub fn compute_indicator(series: &PriceSeries, indicator_type: IndicatorType) -> IndicatorOutput {
    let closes = series.closes();
    match indicator_type {
        IndicatorType::Sma(n) => IndicatorOutput::Simple(calculate_sma(&closes, n)),
        IndicatorType::Ema(n) => IndicatorOutput::Simple(calculate_ema(&closes, n)),
        IndicatorType::Rsi(n) => IndicatorOutput::Simple(calculate_rsi(&closes, n)),
        IndicatorType::Momentum(n) => IndicatorOutput::Simple(calculate_momentum(&closes, n)),
        IndicatorType::Stddev(n) => {
            IndicatorOutput::Simple(calculate_stddev(&closes, n, DeviationKind::Sample))
        }
        IndicatorType::Atr(n) => IndicatorOutput::Simple(calculate_atr(
            &series.highs(),
            &series.lows(),
            &closes,
            n,
        )),
        IndicatorType::Mfi(n) => IndicatorOutput::Simple(calculate_mfi(
            &series.highs(),
            &series.lows(),
            &closes,
            &series.volumes(),
            n,
        )),
        IndicatorType::Macd { fast, slow, signal } => {
            IndicatorOutput::Macd(calculate_macd(&closes, fast, slow, signal))
        }
        IndicatorType::Bollinger {
            period,
            stddev_mult_bits,
        } => IndicatorOutput::Bollinger(calculate_bollinger(
            &closes,
            period,
            f64::from_bits(stddev_mult_bits),
        )),
    }
}

/// Compute every requested indicator, in parallel.
pub fn compute_indicators(series: &PriceSeries, types: &[IndicatorType]) -> IndicatorSet {
    debug!(bars = series.len(), indicators = types.len(), "computing indicators");
    types
        .par_iter()
        .map(|t| (*t, compute_indicator(series, *t)))
        .collect()
}
