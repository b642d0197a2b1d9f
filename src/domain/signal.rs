//! Per-bar trading signals.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => f.write_str("BUY"),
            Signal::Sell => f.write_str("SELL"),
            Signal::Hold => f.write_str("HOLD"),
        }
    }
}

/// How often each signal occurs in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalCounts {
    pub buy: usize,
    pub sell: usize,
    pub hold: usize,
}

/// One signal per input bar, in bar order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignalSeries {
    signals: Vec<Signal>,
}

impl SignalSeries {
    pub fn new(signals: Vec<Signal>) -> Self {
        Self { signals }
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Signal> {
        self.signals.get(index).copied()
    }

    pub fn last(&self) -> Option<Signal> {
        self.signals.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Signal> + '_ {
        self.signals.iter().copied()
    }

    pub fn as_slice(&self) -> &[Signal] {
        &self.signals
    }

    pub fn counts(&self) -> SignalCounts {
        self.signals
            .iter()
            .fold(SignalCounts::default(), |mut acc, s| {
                match s {
                    Signal::Buy => acc.buy += 1,
                    Signal::Sell => acc.sell += 1,
                    Signal::Hold => acc.hold += 1,
                }
                acc
            })
    }
}

impl FromIterator<Signal> for SignalSeries {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
