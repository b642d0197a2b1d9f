//! Rule AST data structures.
//!
//! This module defines the abstract syntax tree for signal conditions:
//! - `Operand`: What can be compared (close price, constants, indicators)
//! - `IndicatorRef`: Reference to an indicator with a specific field
//! - `Rule`: Comparison and conjunction variants
//! - `SignalRule`: A condition paired with the signal it emits

use crate::domain::indicator::{IndicatorField, IndicatorType};
use crate::domain::signal::Signal;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Close,
    Constant(f64),
    Indicator(IndicatorRef),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorRef {
    pub indicator_type: IndicatorType,
    pub field: IndicatorField,
}

impl IndicatorRef {
    pub fn value(indicator_type: IndicatorType) -> Operand {
        Operand::Indicator(IndicatorRef {
            indicator_type,
            field: IndicatorField::Value,
        })
    }

    pub fn field(indicator_type: IndicatorType, field: IndicatorField) -> Operand {
        Operand::Indicator(IndicatorRef {
            indicator_type,
            field,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Above { left: Operand, right: Operand },
    Below { left: Operand, right: Operand },
    And(Vec<Rule>),
}

/// One entry of a strategy's ordered rule list.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRule {
    pub signal: Signal,
    pub condition: Rule,
}

/// Every indicator a rule reads, in first-seen order without duplicates.
pub fn extract_indicators(rule: &Rule) -> Vec<IndicatorType> {
    let mut out = Vec::new();
    collect_indicators(rule, &mut out);
    out
}

fn collect_indicators(rule: &Rule, out: &mut Vec<IndicatorType>) {
    match rule {
        Rule::Above { left, right } | Rule::Below { left, right } => {
            for operand in [left, right] {
                if let Operand::Indicator(r) = operand {
                    if !out.contains(&r.indicator_type) {
                        out.push(r.indicator_type);
                    }
                }
            }
        }
        Rule::And(rules) => {
            for r in rules {
                collect_indicators(r, out);
            }
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Close => f.write_str("close"),
            Operand::Constant(v) => write!(f, "{}", v),
            Operand::Indicator(r) => match r.field {
                IndicatorField::Value => write!(f, "{}", r.indicator_type),
                field => write!(f, "{}.{}", r.indicator_type, field),
            },
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Above { left, right } => write!(f, "{} > {}", left, right),
            Rule::Below { left, right } => write!(f, "{} < {}", left, right),
            Rule::And(rules) => {
                for (i, r) in rules.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" AND ")?;
                    }
                    write!(f, "{}", r)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SignalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} if {}", self.signal, self.condition)
    }
}
