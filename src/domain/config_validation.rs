//! Configuration validation.
//!
//! Turns raw `[strategy]` and `[risk]` sections into validated
//! [`StrategyConfig`] / [`RiskConfig`] values. Missing keys fall back to the
//! defaults; present but unparsable or out-of-range values are rejected.

use crate::domain::error::SignalError;
use crate::domain::risk::{RiskConfig, DEFAULT_ATR_WINDOW, DEFAULT_MULTIPLIER};
use crate::domain::strategy::{MacdParams, StrategyConfig, StrategyParams};
use crate::ports::config_port::ConfigPort;

pub const STRATEGY_SECTION: &str = "strategy";
pub const RISK_SECTION: &str = "risk";

pub fn build_strategy_config(config: &dyn ConfigPort) -> Result<StrategyConfig, SignalError> {
    let name = match config.get_string(STRATEGY_SECTION, "name") {
        Some(s) if !s.trim().is_empty() => s,
        _ => {
            return Err(SignalError::invalid_config(
                "name",
                "strategy name is required",
            ))
        }
    };
    let params = read_strategy_params(config)?;
    StrategyConfig::from_name(&name, &params)
}

pub fn build_risk_config(config: &dyn ConfigPort) -> Result<RiskConfig, SignalError> {
    let atr_window = read_window(config, RISK_SECTION, "atr_window", DEFAULT_ATR_WINDOW)?;
    let multiplier = read_double(config, RISK_SECTION, "multiplier", DEFAULT_MULTIPLIER)?;
    RiskConfig::new(atr_window, multiplier)
}

fn read_strategy_params(config: &dyn ConfigPort) -> Result<StrategyParams, SignalError> {
    let defaults = StrategyParams::default();
    Ok(StrategyParams {
        rsi_window: read_window(config, STRATEGY_SECTION, "rsi_window", defaults.rsi_window)?,
        macd: MacdParams {
            fast: read_window(config, STRATEGY_SECTION, "macd_fast", defaults.macd.fast)?,
            slow: read_window(config, STRATEGY_SECTION, "macd_slow", defaults.macd.slow)?,
            signal: read_window(config, STRATEGY_SECTION, "macd_signal", defaults.macd.signal)?,
        },
        bollinger_window: read_window(
            config,
            STRATEGY_SECTION,
            "bollinger_window",
            defaults.bollinger_window,
        )?,
        bollinger_std_dev: read_double(
            config,
            STRATEGY_SECTION,
            "bollinger_std_dev",
            defaults.bollinger_std_dev,
        )?,
        mfi_window: read_window(config, STRATEGY_SECTION, "mfi_window", defaults.mfi_window)?,
        momentum_window: read_window(
            config,
            STRATEGY_SECTION,
            "momentum_window",
            defaults.momentum_window,
        )?,
    })
}

fn read_window(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, SignalError> {
    if let Some(raw) = config.get_string(section, key) {
        if raw.trim().parse::<i64>().is_err() {
            return Err(SignalError::invalid_config(
                key,
                format!("'{}' is not an integer", raw),
            ));
        }
    }
    let value = config.get_int(section, key, default as i64);
    usize::try_from(value).map_err(|_| {
        SignalError::invalid_config(key, format!("must not be negative, got {}", value))
    })
}

fn read_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, SignalError> {
    if let Some(raw) = config.get_string(section, key) {
        if raw.trim().parse::<f64>().is_err() {
            return Err(SignalError::invalid_config(
                key,
                format!("'{}' is not a number", raw),
            ));
        }
    }
    Ok(config.get_double(section, key, default))
}
