//! Data access port trait.

use crate::domain::error::SignalError;
use crate::domain::series::PriceSeries;

pub trait DataPort {
    /// Load the full, validated bar history of one symbol.
    fn load_series(&self, symbol: &str) -> Result<PriceSeries, SignalError>;

    fn list_symbols(&self) -> Result<Vec<String>, SignalError>;

    /// Load several symbols, stopping at the first failure.
    fn load_many(&self, symbols: &[String]) -> Result<Vec<(String, PriceSeries)>, SignalError> {
        symbols
            .iter()
            .map(|s| Ok((s.clone(), self.load_series(s)?)))
            .collect()
    }
}
