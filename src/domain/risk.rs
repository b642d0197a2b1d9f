//! Take-profit / stop-loss levels derived from ATR.

use crate::domain::error::SignalError;
use crate::domain::indicator::atr::calculate_atr_bars;
use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::series::PriceSeries;

pub const DEFAULT_ATR_WINDOW: usize = 14;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskConfig {
    atr_window: usize,
    multiplier: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            atr_window: DEFAULT_ATR_WINDOW,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

impl RiskConfig {
    pub fn new(atr_window: usize, multiplier: f64) -> Result<Self, SignalError> {
        if atr_window < 2 {
            return Err(SignalError::invalid_config(
                "atr_window",
                format!("window must be at least 2, got {}", atr_window),
            ));
        }
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(SignalError::invalid_config(
                "multiplier",
                format!("must be finite and positive, got {}", multiplier),
            ));
        }
        Ok(Self {
            atr_window,
            multiplier,
        })
    }

    pub fn atr_window(&self) -> usize {
        self.atr_window
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Atr(self.atr_window)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskLevels {
    pub take_profit: f64,
    pub stop_loss: f64,
}

impl RiskLevels {
    /// Levels `multiplier` ATRs either side of `close`.
    pub fn from_atr(close: f64, atr: f64, multiplier: f64) -> Self {
        let offset = multiplier * atr;
        Self {
            take_profit: close + offset,
            stop_loss: close - offset,
        }
    }
}

/// Levels around the last close, or `None` while the last ATR is undefined.
pub fn compute_risk_levels(series: &PriceSeries, config: &RiskConfig) -> Option<RiskLevels> {
    let atr = calculate_atr_bars(series.bars(), config.atr_window);
    risk_levels_from_atr(series, &atr, config)
}

/// Same as [`compute_risk_levels`] over an ATR series computed elsewhere.
pub fn risk_levels_from_atr(
    series: &PriceSeries,
    atr: &IndicatorSeries,
    config: &RiskConfig,
) -> Option<RiskLevels> {
    let last_atr = atr.last()?;
    Some(RiskLevels::from_atr(
        series.last().close,
        last_atr,
        config.multiplier,
    ))
}
