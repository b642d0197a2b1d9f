//! Per-bar feature table: raw OHLCV plus a fixed set of indicator columns.

use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::domain::indicator::{IndicatorField, IndicatorType};
use crate::domain::indicator_helpers::compute_indicators;
use crate::domain::rule::IndicatorRef;
use crate::domain::series::PriceSeries;

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    pub source: IndicatorRef,
}

impl FeatureColumn {
    pub fn new(name: &str, indicator_type: IndicatorType, field: IndicatorField) -> Self {
        Self {
            name: name.to_string(),
            source: IndicatorRef {
                indicator_type,
                field,
            },
        }
    }
}

/// The standard column set.
pub fn default_columns() -> Vec<FeatureColumn> {
    let macd = IndicatorType::Macd {
        fast: DEFAULT_FAST,
        slow: DEFAULT_SLOW,
        signal: DEFAULT_SIGNAL,
    };
    let bands = IndicatorType::bollinger(20, 2.0);
    vec![
        FeatureColumn::new("sma_50", IndicatorType::Sma(50), IndicatorField::Value),
        FeatureColumn::new("sma_200", IndicatorType::Sma(200), IndicatorField::Value),
        FeatureColumn::new("ema_12", IndicatorType::Ema(12), IndicatorField::Value),
        FeatureColumn::new("ema_26", IndicatorType::Ema(26), IndicatorField::Value),
        FeatureColumn::new("rsi_14", IndicatorType::Rsi(14), IndicatorField::Value),
        FeatureColumn::new("macd", macd, IndicatorField::MacdLine),
        FeatureColumn::new("macd_signal", macd, IndicatorField::MacdSignal),
        FeatureColumn::new("macd_histogram", macd, IndicatorField::MacdHistogram),
        FeatureColumn::new("atr_14", IndicatorType::Atr(14), IndicatorField::Value),
        FeatureColumn::new("bb_upper", bands, IndicatorField::BollingerUpper),
        FeatureColumn::new("bb_middle", bands, IndicatorField::BollingerMiddle),
        FeatureColumn::new("bb_lower", bands, IndicatorField::BollingerLower),
        FeatureColumn::new("mfi_14", IndicatorType::Mfi(14), IndicatorField::Value),
        FeatureColumn::new("momentum_14", IndicatorType::Momentum(14), IndicatorField::Value),
    ]
}

/// Indicator columns aligned with the bars of the series they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub names: Vec<String>,
    pub columns: Vec<Vec<Option<f64>>>,
}

impl FeatureTable {
    pub fn row(&self, index: usize) -> Vec<Option<f64>> {
        self.columns
            .iter()
            .map(|c| c.get(index).copied().flatten())
            .collect()
    }
}

pub fn build_feature_table(series: &PriceSeries, columns: &[FeatureColumn]) -> FeatureTable {
    let mut types: Vec<IndicatorType> = Vec::new();
    for c in columns {
        if !types.contains(&c.source.indicator_type) {
            types.push(c.source.indicator_type);
        }
    }
    let indicators = compute_indicators(series, &types);

    let values = columns
        .iter()
        .map(|c| match indicators.get(&c.source.indicator_type) {
            Some(output) => (0..series.len())
                .map(|i| output.value(c.source.field, i))
                .collect(),
            None => vec![None; series.len()],
        })
        .collect();

    FeatureTable {
        names: columns.iter().map(|c| c.name.clone()).collect(),
        columns: values,
    }
}
