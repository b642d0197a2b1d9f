//! Rule evaluation engine.
//!
//! Evaluates rules against price bars and pre-computed indicator values.
//!
//! # Evaluation Semantics
//!
//! - Comparison rules: evaluate at the given bar index; `None` when either
//!   side is undefined there (warm-up, missing indicator, wrong field)
//! - `AND`: every child is evaluated; any undefined child makes the whole
//!   conjunction undefined, otherwise it is true iff all children are
//! - Rule lists: every entry is evaluated; an undefined entry resolves the
//!   bar to `Hold`, otherwise the first true entry in list order wins and no
//!   true entry means `Hold`

use crate::domain::indicator_helpers::IndicatorSet;
use crate::domain::ohlcv::PriceBar;
use crate::domain::rule::{IndicatorRef, Operand, Rule, SignalRule};
use crate::domain::signal::Signal;

pub fn evaluate(
    rule: &Rule,
    bars: &[PriceBar],
    indicators: &IndicatorSet,
    bar_index: usize,
) -> Option<bool> {
    match rule {
        Rule::Above { left, right } => {
            let left_val = resolve_operand(left, bars, indicators, bar_index)?;
            let right_val = resolve_operand(right, bars, indicators, bar_index)?;
            Some(left_val > right_val)
        }
        Rule::Below { left, right } => {
            let left_val = resolve_operand(left, bars, indicators, bar_index)?;
            let right_val = resolve_operand(right, bars, indicators, bar_index)?;
            Some(left_val < right_val)
        }
        Rule::And(rules) => {
            let mut all = true;
            for r in rules {
                all &= evaluate(r, bars, indicators, bar_index)?;
            }
            Some(all)
        }
    }
}

/// Reduce an ordered rule list to the signal for one bar.
pub fn resolve_signal(
    rules: &[SignalRule],
    bars: &[PriceBar],
    indicators: &IndicatorSet,
    bar_index: usize,
) -> Signal {
    let mut chosen = None;
    for rule in rules {
        match evaluate(&rule.condition, bars, indicators, bar_index) {
            None => return Signal::Hold,
            Some(true) if chosen.is_none() => chosen = Some(rule.signal),
            Some(_) => {}
        }
    }
    chosen.unwrap_or(Signal::Hold)
}

fn resolve_operand(
    operand: &Operand,
    bars: &[PriceBar],
    indicators: &IndicatorSet,
    bar_index: usize,
) -> Option<f64> {
    match operand {
        Operand::Close => bars.get(bar_index).map(|b| b.close),
        Operand::Constant(v) => Some(*v),
        Operand::Indicator(ind_ref) => resolve_indicator(ind_ref, indicators, bar_index),
    }
}

fn resolve_indicator(
    ind_ref: &IndicatorRef,
    indicators: &IndicatorSet,
    bar_index: usize,
) -> Option<f64> {
    indicators
        .get(&ind_ref.indicator_type)?
        .value(ind_ref.field, bar_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;
    use crate::domain::indicator::{IndicatorOutput, IndicatorSeries, IndicatorType};
    use crate::domain::rule::SignalRule;

    fn simple(indicator_type: IndicatorType, values: Vec<Option<f64>>) -> IndicatorSet {
        let mut set = IndicatorSet::new();
        set.insert(
            indicator_type,
            IndicatorOutput::Simple(IndicatorSeries::new(indicator_type, values)),
        );
        set
    }

    fn close_above(v: f64) -> Rule {
        Rule::Above {
            left: Operand::Close,
            right: Operand::Constant(v),
        }
    }

    fn close_below(v: f64) -> Rule {
        Rule::Below {
            left: Operand::Close,
            right: Operand::Constant(v),
        }
    }

    #[test]
    fn evaluate_above_close_gt_constant() {
        let bars = make_bars(&[110.0]);
        let set = IndicatorSet::new();
        assert_eq!(evaluate(&close_above(100.0), &bars, &set, 0), Some(true));
        assert_eq!(evaluate(&close_above(120.0), &bars, &set, 0), Some(false));
    }

    #[test]
    fn evaluate_below_is_strict() {
        let bars = make_bars(&[100.0]);
        let set = IndicatorSet::new();
        assert_eq!(evaluate(&close_below(100.0), &bars, &set, 0), Some(false));
        assert_eq!(evaluate(&close_above(100.0), &bars, &set, 0), Some(false));
    }

    #[test]
    fn evaluate_with_indicator() {
        let bars = make_bars(&[100.0, 100.0]);
        let set = simple(IndicatorType::Rsi(2), vec![None, Some(25.0)]);
        let rule = Rule::Below {
            left: IndicatorRef::value(IndicatorType::Rsi(2)),
            right: Operand::Constant(30.0),
        };
        assert_eq!(evaluate(&rule, &bars, &set, 0), None);
        assert_eq!(evaluate(&rule, &bars, &set, 1), Some(true));
    }

    #[test]
    fn evaluate_indicator_missing() {
        let bars = make_bars(&[100.0]);
        let rule = Rule::Below {
            left: IndicatorRef::value(IndicatorType::Mfi(14)),
            right: Operand::Constant(20.0),
        };
        assert_eq!(evaluate(&rule, &bars, &IndicatorSet::new(), 0), None);
    }

    #[test]
    fn evaluate_and_all_true() {
        let bars = make_bars(&[100.0]);
        let rule = Rule::And(vec![close_above(50.0), close_below(150.0)]);
        assert_eq!(evaluate(&rule, &bars, &IndicatorSet::new(), 0), Some(true));
    }

    #[test]
    fn evaluate_and_one_false() {
        let bars = make_bars(&[100.0]);
        let rule = Rule::And(vec![close_above(150.0), close_below(150.0)]);
        assert_eq!(evaluate(&rule, &bars, &IndicatorSet::new(), 0), Some(false));
    }

    #[test]
    fn evaluate_and_undefined_beats_false() {
        let bars = make_bars(&[100.0]);
        let set = simple(IndicatorType::Rsi(2), vec![None]);
        let rule = Rule::And(vec![
            close_above(150.0),
            Rule::Below {
                left: IndicatorRef::value(IndicatorType::Rsi(2)),
                right: Operand::Constant(30.0),
            },
        ]);
        assert_eq!(evaluate(&rule, &bars, &set, 0), None);
    }

    #[test]
    fn resolve_first_match_wins() {
        let bars = make_bars(&[100.0]);
        let rules = vec![
            SignalRule {
                signal: Signal::Buy,
                condition: close_above(50.0),
            },
            SignalRule {
                signal: Signal::Sell,
                condition: close_above(60.0),
            },
        ];
        assert_eq!(resolve_signal(&rules, &bars, &IndicatorSet::new(), 0), Signal::Buy);
    }

    #[test]
    fn resolve_no_match_is_hold() {
        let bars = make_bars(&[100.0]);
        let rules = vec![SignalRule {
            signal: Signal::Sell,
            condition: close_above(200.0),
        }];
        assert_eq!(resolve_signal(&rules, &bars, &IndicatorSet::new(), 0), Signal::Hold);
    }

    #[test]
    fn resolve_undefined_anywhere_is_hold() {
        let bars = make_bars(&[100.0]);
        let set = simple(IndicatorType::Rsi(2), vec![None]);
        let rules = vec![
            SignalRule {
                signal: Signal::Buy,
                condition: close_above(50.0),
            },
            SignalRule {
                signal: Signal::Sell,
                condition: Rule::Above {
                    left: IndicatorRef::value(IndicatorType::Rsi(2)),
                    right: Operand::Constant(70.0),
                },
            },
        ];
        assert_eq!(resolve_signal(&rules, &bars, &set, 0), Signal::Hold);
    }
}
