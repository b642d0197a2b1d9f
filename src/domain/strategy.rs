//! Strategy configuration and the rule lists each strategy evaluates.
//!
//! A strategy is one of three fixed decision rules. Each resolves to an
//! ordered list of [`SignalRule`]s; the first rule whose condition holds on a
//! bar decides the signal for that bar.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::SignalError;
use crate::domain::indicator::{IndicatorField, IndicatorType};
use crate::domain::rule::{extract_indicators, IndicatorRef, Operand, Rule, SignalRule};
use crate::domain::signal::Signal;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const MFI_OVERSOLD: f64 = 20.0;
pub const MFI_OVERBOUGHT: f64 = 80.0;

pub const DEFAULT_RSI_WINDOW: usize = 14;
pub const DEFAULT_BOLLINGER_WINDOW: usize = 20;
pub const DEFAULT_BOLLINGER_STD_DEV: f64 = 2.0;
pub const DEFAULT_MFI_WINDOW: usize = 14;
pub const DEFAULT_MOMENTUM_WINDOW: usize = 14;

const MIN_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    RsiMacd,
    BollingerBreakout,
    MoneyFlowMomentum,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::RsiMacd,
        StrategyKind::BollingerBreakout,
        StrategyKind::MoneyFlowMomentum,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::RsiMacd => "rsi_macd",
            StrategyKind::BollingerBreakout => "bollinger_breakout",
            StrategyKind::MoneyFlowMomentum => "money_flow_momentum",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StrategyKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                SignalError::invalid_config("name", format!("unknown strategy '{}'", wanted))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
        Self {
            fast: DEFAULT_FAST,
            slow: DEFAULT_SLOW,
            signal: DEFAULT_SIGNAL,
        }
    }
}

impl MacdParams {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Result<Self, SignalError> {
        check_window("macd_fast", fast)?;
        check_window("macd_slow", slow)?;
        check_window("macd_signal", signal)?;
        Ok(Self { fast, slow, signal })
    }

    pub fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Macd {
            fast: self.fast,
            slow: self.slow,
            signal: self.signal,
        }
    }
}

/// Every tunable parameter, before a strategy has been chosen.
///
/// Only the fields belonging to the selected strategy are read.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub rsi_window: usize,
    pub macd: MacdParams,
    pub bollinger_window: usize,
    pub bollinger_std_dev: f64,
    pub mfi_window: usize,
    pub momentum_window: usize,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            rsi_window: DEFAULT_RSI_WINDOW,
            macd: MacdParams::default(),
            bollinger_window: DEFAULT_BOLLINGER_WINDOW,
            bollinger_std_dev: DEFAULT_BOLLINGER_STD_DEV,
            mfi_window: DEFAULT_MFI_WINDOW,
            momentum_window: DEFAULT_MOMENTUM_WINDOW,
        }
    }
}

/// A validated strategy selection.
///
/// Build through [`StrategyConfig::rsi_macd`], [`StrategyConfig::bollinger_breakout`],
/// [`StrategyConfig::money_flow_momentum`] or [`StrategyConfig::from_name`].
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyConfig {
    RsiMacd {
        rsi_window: usize,
        macd: MacdParams,
    },
    BollingerBreakout {
        window: usize,
        std_dev_multiplier: f64,
    },
    MoneyFlowMomentum {
        mfi_window: usize,
        momentum_window: usize,
    },
}

impl StrategyConfig {
    pub fn rsi_macd(rsi_window: usize, macd: MacdParams) -> Result<Self, SignalError> {
        check_window("rsi_window", rsi_window)?;
        let macd = MacdParams::new(macd.fast, macd.slow, macd.signal)?;
        Ok(StrategyConfig::RsiMacd { rsi_window, macd })
    }

    pub fn bollinger_breakout(
        window: usize,
        std_dev_multiplier: f64,
    ) -> Result<Self, SignalError> {
        check_window("bollinger_window", window)?;
        if !std_dev_multiplier.is_finite() || std_dev_multiplier <= 0.0 {
            return Err(SignalError::invalid_config(
                "bollinger_std_dev",
                format!("must be finite and positive, got {}", std_dev_multiplier),
            ));
        }
        Ok(StrategyConfig::BollingerBreakout {
            window,
            std_dev_multiplier,
        })
    }

    pub fn money_flow_momentum(
        mfi_window: usize,
        momentum_window: usize,
    ) -> Result<Self, SignalError> {
        check_window("mfi_window", mfi_window)?;
        check_window("momentum_window", momentum_window)?;
        Ok(StrategyConfig::MoneyFlowMomentum {
            mfi_window,
            momentum_window,
        })
    }

    /// Select a strategy by name and pull its parameters from `params`.
    pub fn from_name(name: &str, params: &StrategyParams) -> Result<Self, SignalError> {
        match name.parse::<StrategyKind>()? {
            StrategyKind::RsiMacd => Self::rsi_macd(params.rsi_window, params.macd),
            StrategyKind::BollingerBreakout => {
                Self::bollinger_breakout(params.bollinger_window, params.bollinger_std_dev)
            }
            StrategyKind::MoneyFlowMomentum => {
                Self::money_flow_momentum(params.mfi_window, params.momentum_window)
            }
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            StrategyConfig::RsiMacd { .. } => StrategyKind::RsiMacd,
            StrategyConfig::BollingerBreakout { .. } => StrategyKind::BollingerBreakout,
            StrategyConfig::MoneyFlowMomentum { .. } => StrategyKind::MoneyFlowMomentum,
        }
    }

    /// Ordered rule list; the first rule that holds on a bar wins.
    pub fn rules(&self) -> Vec<SignalRule> {
        match *self {
            StrategyConfig::RsiMacd { rsi_window, macd } => {
                let rsi = IndicatorRef::value(IndicatorType::Rsi(rsi_window));
                let macd = macd.indicator_type();
                let line = IndicatorRef::field(macd, IndicatorField::MacdLine);
                let signal = IndicatorRef::field(macd, IndicatorField::MacdSignal);
                vec![
                    SignalRule {
                        signal: Signal::Buy,
                        condition: Rule::And(vec![
                            Rule::Below {
                                left: rsi.clone(),
                                right: Operand::Constant(RSI_OVERSOLD),
                            },
                            Rule::Above {
                                left: line.clone(),
                                right: signal.clone(),
                            },
                        ]),
                    },
                    SignalRule {
                        signal: Signal::Sell,
                        condition: Rule::And(vec![
                            Rule::Above {
                                left: rsi,
                                right: Operand::Constant(RSI_OVERBOUGHT),
                            },
                            Rule::Below {
                                left: line,
                                right: signal,
                            },
                        ]),
                    },
                ]
            }
            StrategyConfig::BollingerBreakout {
                window,
                std_dev_multiplier,
            } => {
                let bands = IndicatorType::bollinger(window, std_dev_multiplier);
                vec![
                    SignalRule {
                        signal: Signal::Buy,
                        condition: Rule::Below {
                            left: Operand::Close,
                            right: IndicatorRef::field(bands, IndicatorField::BollingerLower),
                        },
                    },
                    SignalRule {
                        signal: Signal::Sell,
                        condition: Rule::Above {
                            left: Operand::Close,
                            right: IndicatorRef::field(bands, IndicatorField::BollingerUpper),
                        },
                    },
                ]
            }
            StrategyConfig::MoneyFlowMomentum {
                mfi_window,
                momentum_window,
            } => {
                let mfi = IndicatorRef::value(IndicatorType::Mfi(mfi_window));
                let momentum = IndicatorRef::value(IndicatorType::Momentum(momentum_window));
                vec![
                    SignalRule {
                        signal: Signal::Buy,
                        condition: Rule::And(vec![
                            Rule::Below {
                                left: mfi.clone(),
                                right: Operand::Constant(MFI_OVERSOLD),
                            },
                            Rule::Above {
                                left: momentum.clone(),
                                right: Operand::Constant(0.0),
                            },
                        ]),
                    },
                    SignalRule {
                        signal: Signal::Sell,
                        condition: Rule::And(vec![
                            Rule::Above {
                                left: mfi,
                                right: Operand::Constant(MFI_OVERBOUGHT),
                            },
                            Rule::Below {
                                left: momentum,
                                right: Operand::Constant(0.0),
                            },
                        ]),
                    },
                ]
            }
        }
    }

    /// Indicators the rule list reads, without duplicates.
    pub fn required_indicators(&self) -> Vec<IndicatorType> {
        let mut out: Vec<IndicatorType> = Vec::new();
        for rule in self.rules() {
            for t in extract_indicators(&rule.condition) {
                if !out.contains(&t) {
                    out.push(t);
                }
            }
        }
        out
    }

    /// Number of leading bars that are always `Hold` because some required
    /// indicator is still warming up.
    pub fn warmup_bars(&self) -> usize {
        self.required_indicators()
            .iter()
            .map(|t| t.first_defined_index().unwrap_or(usize::MAX))
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for StrategyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyConfig::RsiMacd { rsi_window, macd } => write!(
                f,
                "{} (rsi_window={}, macd={}/{}/{})",
                self.kind(),
                rsi_window,
                macd.fast,
                macd.slow,
                macd.signal
            ),
            StrategyConfig::BollingerBreakout {
                window,
                std_dev_multiplier,
            } => write!(
                f,
                "{} (window={}, std_dev={})",
                self.kind(),
                window,
                std_dev_multiplier
            ),
            StrategyConfig::MoneyFlowMomentum {
                mfi_window,
                momentum_window,
            } => write!(
                f,
                "{} (mfi_window={}, momentum_window={})",
                self.kind(),
                mfi_window,
                momentum_window
            ),
        }
    }
}

fn check_window(key: &str, window: usize) -> Result<(), SignalError> {
    if window < MIN_WINDOW {
        return Err(SignalError::invalid_config(
            key,
            format!("window must be at least {}, got {}", MIN_WINDOW, window),
        ));
    }
    Ok(())
}
