//! Validated, immutable price series.

use crate::domain::error::SignalError;
use crate::domain::ohlcv::PriceBar;

/// Non-empty, strictly time-ordered sequence of bars.
///
/// The only way to obtain one is [`PriceSeries::new`], so every consumer can
/// rely on the bar invariants without re-checking them.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, SignalError> {
        if bars.is_empty() {
            return Err(SignalError::malformed(0, "series must contain at least one bar"));
        }
        for (i, bar) in bars.iter().enumerate() {
            bar.validate(i)?;
            if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
                return Err(SignalError::malformed(
                    i,
                    format!(
                        "timestamp {} does not increase on previous {}",
                        bar.timestamp,
                        bars[i - 1].timestamp
                    ),
                ));
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> &PriceBar {
        // non-empty by construction
        &self.bars[self.bars.len() - 1]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    pub fn timestamps(&self) -> Vec<i64> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(timestamp: i64, close: f64) -> PriceBar {
        PriceBar {
            timestamp,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn new_accepts_increasing_timestamps() {
        let series = PriceSeries::new(vec![bar(1, 10.0), bar(2, 11.0), bar(5, 12.0)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
        assert_eq!(series.highs(), vec![11.0, 12.0, 13.0]);
        assert_eq!(series.lows(), vec![9.0, 10.0, 11.0]);
        assert_eq!(series.timestamps(), vec![1, 2, 5]);
        assert_eq!(series.last().close, 12.0);
    }

    #[test]
    fn new_rejects_empty() {
        let err = PriceSeries::new(vec![]).unwrap_err();
        assert!(matches!(err, SignalError::MalformedSeries { position: 0, .. }));
    }

    #[test]
    fn new_rejects_duplicate_timestamp() {
        let err = PriceSeries::new(vec![bar(1, 10.0), bar(2, 11.0), bar(2, 12.0)]).unwrap_err();
        assert!(matches!(err, SignalError::MalformedSeries { position: 2, .. }));
    }

    #[test]
    fn new_rejects_decreasing_timestamp() {
        let err = PriceSeries::new(vec![bar(5, 10.0), bar(4, 11.0)]).unwrap_err();
        assert!(matches!(err, SignalError::MalformedSeries { position: 1, .. }));
    }

    #[test]
    fn new_reports_invalid_bar_position() {
        let mut broken = bar(3, 12.0);
        broken.high = 5.0;
        let err = PriceSeries::new(vec![bar(1, 10.0), bar(2, 11.0), broken]).unwrap_err();
        assert!(matches!(err, SignalError::MalformedSeries { position: 2, .. }));
    }
}
