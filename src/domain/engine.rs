//! Strategy evaluation over price series.
//!
//! One evaluation computes every indicator the strategy and the risk model
//! need, resolves the rule list bar by bar, and derives risk levels from the
//! last ATR value. Nothing is carried between calls.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::error::SignalError;
use crate::domain::indicator::IndicatorOutput;
use crate::domain::indicator_helpers::compute_indicators;
use crate::domain::ohlcv::PriceBar;
use crate::domain::risk::{risk_levels_from_atr, RiskConfig, RiskLevels};
use crate::domain::rule_eval::resolve_signal;
use crate::domain::series::PriceSeries;
use crate::domain::signal::SignalSeries;
use crate::domain::strategy::{StrategyConfig, StrategyKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub strategy: StrategyKind,
    pub signals: SignalSeries,
    pub risk: Option<RiskLevels>,
}

/// Evaluate a strategy over a validated series.
pub fn evaluate(series: &PriceSeries, strategy: &StrategyConfig, risk: &RiskConfig) -> Evaluation {
    let rules = strategy.rules();
    let atr_type = risk.indicator_type();
    let mut types = strategy.required_indicators();
    if !types.contains(&atr_type) {
        types.push(atr_type);
    }

    let indicators = compute_indicators(series, &types);
    let bars = series.bars();
    let signals: SignalSeries = (0..bars.len())
        .map(|i| resolve_signal(&rules, bars, &indicators, i))
        .collect();

    let risk_levels = match indicators.get(&atr_type) {
        Some(IndicatorOutput::Simple(atr)) => risk_levels_from_atr(series, atr, risk),
        _ => None,
    };

    let counts = signals.counts();
    debug!(
        strategy = %strategy.kind(),
        bars = bars.len(),
        buy = counts.buy,
        sell = counts.sell,
        hold = counts.hold,
        has_risk = risk_levels.is_some(),
        "evaluation complete"
    );

    Evaluation {
        strategy: strategy.kind(),
        signals,
        risk: risk_levels,
    }
}

/// Validate raw bars, then evaluate. Malformed input fails before any
/// indicator runs.
pub fn evaluate_bars(
    bars: Vec<PriceBar>,
    strategy: &StrategyConfig,
    risk: &RiskConfig,
) -> Result<Evaluation, SignalError> {
    let series = PriceSeries::new(bars)?;
    Ok(evaluate(&series, strategy, risk))
}

/// Evaluate independent series in parallel. Output order follows input order.
pub fn evaluate_many(
    series: &[(String, PriceSeries)],
    strategy: &StrategyConfig,
    risk: &RiskConfig,
) -> Vec<(String, Evaluation)> {
    debug!(symbols = series.len(), strategy = %strategy.kind(), "evaluating symbols");
    series
        .par_iter()
        .map(|(symbol, s)| (symbol.clone(), evaluate(s, strategy, risk)))
        .collect()
}
