//! CSV report adapter implementing ReportPort.
//!
//! Undefined indicator values are written as empty cells.

use std::fs::File;

use tracing::debug;

use crate::domain::engine::Evaluation;
use crate::domain::error::SignalError;
use crate::domain::features::FeatureTable;
use crate::domain::series::PriceSeries;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn open(output_path: &str) -> Result<csv::Writer<File>, SignalError> {
        debug!(path = output_path, "writing report");
        csv::Writer::from_path(output_path).map_err(|e| SignalError::Report {
            reason: format!("failed to create {}: {}", output_path, e),
        })
    }
}

fn report_err(e: impl std::fmt::Display) -> SignalError {
    SignalError::Report {
        reason: e.to_string(),
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        symbol: &str,
        series: &PriceSeries,
        evaluation: &Evaluation,
        output_path: &str,
    ) -> Result<(), SignalError> {
        if evaluation.signals.len() != series.len() {
            return Err(SignalError::Report {
                reason: format!(
                    "{}: {} signals for {} bars",
                    symbol,
                    evaluation.signals.len(),
                    series.len()
                ),
            });
        }

        let mut wtr = Self::open(output_path)?;
        wtr.write_record(["timestamp", "close", "signal"])
            .map_err(report_err)?;
        for (bar, signal) in series.bars().iter().zip(evaluation.signals.iter()) {
            wtr.write_record([
                bar.timestamp.to_string(),
                bar.close.to_string(),
                signal.to_string(),
            ])
            .map_err(report_err)?;
        }
        wtr.flush().map_err(report_err)?;
        Ok(())
    }

    fn write_features(
        &self,
        symbol: &str,
        series: &PriceSeries,
        table: &FeatureTable,
        output_path: &str,
    ) -> Result<(), SignalError> {
        if table.columns.iter().any(|c| c.len() != series.len()) {
            return Err(SignalError::Report {
                reason: format!("{}: feature columns do not match {} bars", symbol, series.len()),
            });
        }

        let mut wtr = Self::open(output_path)?;
        let mut header: Vec<String> = ["timestamp", "open", "high", "low", "close", "volume"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        header.extend(table.names.iter().cloned());
        wtr.write_record(&header).map_err(report_err)?;

        for (i, bar) in series.bars().iter().enumerate() {
            let mut record = vec![
                bar.timestamp.to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.volume.to_string(),
            ];
            record.extend(table.row(i).into_iter().map(cell));
            wtr.write_record(&record).map_err(report_err)?;
        }
        wtr.flush().map_err(report_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine::evaluate;
    use crate::domain::features::{build_feature_table, FeatureColumn};
    use crate::domain::indicator::test_support::make_bars;
    use crate::domain::indicator::{IndicatorField, IndicatorType};
    use crate::domain::risk::RiskConfig;
    use crate::domain::signal::SignalSeries;
    use crate::domain::strategy::{MacdParams, StrategyConfig, StrategyKind};
    use std::fs;
    use tempfile::TempDir;

    fn series() -> PriceSeries {
        PriceSeries::new(make_bars(&[100.0, 101.5, 99.0])).unwrap()
    }

    #[test]
    fn write_signals_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("signals.csv");
        let s = series();
        let strategy = StrategyConfig::rsi_macd(14, MacdParams::default()).unwrap();
        let eval = evaluate(&s, &strategy, &RiskConfig::default());

        CsvReportAdapter::new()
            .write("BTC", &s, &eval, path.to_str().unwrap())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "timestamp,close,signal\n0,100,HOLD\n1,101.5,HOLD\n2,99,HOLD\n"
        );
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("signals.csv");
        let eval = Evaluation {
            strategy: StrategyKind::RsiMacd,
            signals: SignalSeries::default(),
            risk: None,
        };
        let err = CsvReportAdapter::new()
            .write("BTC", &series(), &eval, path.to_str().unwrap())
            .unwrap_err();
        assert!(matches!(err, SignalError::Report { .. }));
    }

    #[test]
    fn unwritable_path_is_report_error() {
        let s = series();
        let strategy = StrategyConfig::bollinger_breakout(2, 2.0).unwrap();
        let eval = evaluate(&s, &strategy, &RiskConfig::default());
        let err = CsvReportAdapter::new()
            .write("BTC", &s, &eval, "/nonexistent/dir/out.csv")
            .unwrap_err();
        assert!(matches!(err, SignalError::Report { .. }));
    }

    #[test]
    fn write_features_leaves_undefined_cells_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("features.csv");
        let s = series();
        let columns = vec![FeatureColumn::new(
            "sma_2",
            IndicatorType::Sma(2),
            IndicatorField::Value,
        )];
        let table = build_feature_table(&s, &columns);

        CsvReportAdapter::new()
            .write_features("BTC", &s, &table, path.to_str().unwrap())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "timestamp,open,high,low,close,volume,sma_2");
        assert_eq!(lines[1], "0,100,100,100,100,1000,");
        assert_eq!(lines[2], "1,101.5,101.5,101.5,101.5,1000,100.75");
        assert_eq!(lines.len(), 4);
    }
}
