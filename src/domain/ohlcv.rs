//! OHLCV bar representation.

use crate::domain::error::SignalError;
use crate::domain::indicator::atr;

/// One OHLCV record. `timestamp` is an epoch value (seconds or milliseconds,
/// the engine only relies on its ordering).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        atr::true_range(self.high, self.low, prev_close)
    }

    /// Checks the per-bar invariants. `position` is only used for the error.
    pub fn validate(&self, position: usize) -> Result<(), SignalError> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (field, value) in prices {
            if !value.is_finite() || value <= 0.0 {
                return Err(SignalError::malformed(
                    position,
                    format!("{field} must be finite and positive, got {value}"),
                ));
            }
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(SignalError::malformed(
                position,
                format!("volume must be finite and non-negative, got {}", self.volume),
            ));
        }
        if self.high < self.open.max(self.close).max(self.low) {
            return Err(SignalError::malformed(
                position,
                format!("high {} is below open/close/low", self.high),
            ));
        }
        if self.low > self.open.min(self.close).min(self.high) {
            return Err(SignalError::malformed(
                position,
                format!("low {} is above open/close/high", self.low),
            ));
        }
        Ok(())
    }
}
