//! Money Flow Index.
//!
//! TP = (H + L + C) / 3, raw flow = TP × V. A bar whose TP rose from the
//! previous bar adds its flow to the positive bucket, otherwise (flat or
//! falling) to the negative one; never both. The first bar has no previous TP
//! and joins neither.
//!
//! MFI = 100 - 100 / (1 + positive_sum / negative_sum) over the last n flows,
//! with the same zero-denominator rules as RSI (100 when only positive flow,
//! 50 when no flow at all).
//!
//! Warmup: first n positions are undefined.

use crate::domain::indicator::rolling::RollingWindow;
use crate::domain::indicator::rsi::strength_index;
use crate::domain::indicator::{run, Indicator, IndicatorSeries, IndicatorType};

#[derive(Debug, Clone)]
pub struct Mfi {
    prev_typical: Option<f64>,
    positive: RollingWindow,
    negative: RollingWindow,
}

impl Mfi {
    pub fn new(period: usize) -> Self {
        Self {
            prev_typical: None,
            positive: RollingWindow::new(period),
            negative: RollingWindow::new(period),
        }
    }
}

impl Indicator for Mfi {
    /// (high, low, close, volume)
    type Input = (f64, f64, f64, f64);
    type Output = f64;

    fn next(&mut self, (high, low, close, volume): Self::Input) -> Option<f64> {
        let typical = (high + low + close) / 3.0;
        let prev = self.prev_typical.replace(typical)?;
        let flow = typical * volume;

        if typical - prev > 0.0 {
            self.positive.push(flow);
            self.negative.push(0.0);
        } else {
            self.positive.push(0.0);
            self.negative.push(flow);
        }

        if !self.positive.is_full() {
            return None;
        }
        Some(strength_index(self.positive.sum(), self.negative.sum()))
    }
}

pub fn calculate_mfi(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: &[f64],
    period: usize,
) -> IndicatorSeries {
    let inputs = high
        .iter()
        .zip(low)
        .zip(close)
        .zip(volume)
        .map(|(((&h, &l), &c), &v)| (h, l, c, v));
    IndicatorSeries::new(IndicatorType::Mfi(period), run(Mfi::new(period), inputs))
}
