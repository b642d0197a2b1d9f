//! Core domain types and logic.

pub mod ohlcv;
pub mod series;
pub mod indicator;
pub mod indicator_helpers;
pub mod rule;
pub mod rule_eval;
pub mod signal;
pub mod strategy;
pub mod risk;
pub mod engine;
pub mod features;
pub mod config_validation;
pub mod error;
