//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{build_risk_config, build_strategy_config};
use crate::domain::engine::{self, Evaluation};
use crate::domain::error::SignalError;
use crate::domain::features::{build_feature_table, default_columns};
use crate::domain::risk::RiskConfig;
use crate::domain::strategy::StrategyConfig;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "barsignal", about = "Technical-indicator trading signals over OHLCV bars")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a strategy over one symbol
    Evaluate {
        /// Directory holding <SYMBOL>.csv bar files
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        strategy: PathBuf,
        /// Write per-bar signals to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate a strategy over many symbols in parallel
    Scan {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        strategy: PathBuf,
        /// Comma-separated symbols; every CSV file in the data directory when omitted
        #[arg(long, value_delimiter = ',')]
        symbols: Option<Vec<String>>,
    },
    /// Validate a strategy configuration
    Validate {
        #[arg(short, long)]
        strategy: PathBuf,
    },
    /// Compute the indicator feature table for one symbol
    Features {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Evaluate {
            data,
            symbol,
            strategy,
            output,
        } => run_evaluate(&data, &symbol, &strategy, output.as_deref()),
        Command::Scan {
            data,
            strategy,
            symbols,
        } => run_scan(&data, &strategy, symbols),
        Command::Validate { strategy } => run_validate(&strategy),
        Command::Features {
            data,
            symbol,
            output,
        } => run_features(&data, &symbol, output.as_deref()),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Load and validate the `[strategy]` and `[risk]` sections of an INI file.
pub fn load_strategy(path: &Path) -> Result<(StrategyConfig, RiskConfig), SignalError> {
    info!("Loading strategy from {}", path.display());
    let adapter = FileConfigAdapter::from_file(path)?;
    let strategy = build_strategy_config(&adapter)?;
    let risk = build_risk_config(&adapter)?;
    Ok((strategy, risk))
}

fn output_str(path: &Path) -> Result<&str, SignalError> {
    path.to_str().ok_or_else(|| SignalError::Report {
        reason: format!("output path {} is not valid UTF-8", path.display()),
    })
}

fn summary_line(symbol: &str, evaluation: &Evaluation) -> String {
    let counts = evaluation.signals.counts();
    let last = evaluation
        .signals
        .last()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    let risk = match evaluation.risk {
        Some(r) => format!("tp={:.4} sl={:.4}", r.take_profit, r.stop_loss),
        None => "tp=- sl=-".to_string(),
    };
    format!(
        "{:<12} {:<20} last={:<4} buy={} sell={} hold={} {}",
        symbol,
        evaluation.strategy.to_string(),
        last,
        counts.buy,
        counts.sell,
        counts.hold,
        risk
    )
}

fn run_evaluate(
    data: &Path,
    symbol: &str,
    strategy_path: &Path,
    output: Option<&Path>,
) -> Result<(), SignalError> {
    let (strategy, risk) = load_strategy(strategy_path)?;
    info!("Strategy: {}", strategy);

    let adapter = CsvAdapter::new(data.to_path_buf());
    let series = adapter.load_series(symbol)?;
    info!("Loaded {} bars for {}", series.len(), symbol);

    let evaluation = engine::evaluate(&series, &strategy, &risk);
    println!("{}", summary_line(symbol, &evaluation));

    if let Some(path) = output {
        CsvReportAdapter::new().write(symbol, &series, &evaluation, output_str(path)?)?;
        info!("Signals written to {}", path.display());
    }
    Ok(())
}

fn run_scan(
    data: &Path,
    strategy_path: &Path,
    symbols: Option<Vec<String>>,
) -> Result<(), SignalError> {
    let (strategy, risk) = load_strategy(strategy_path)?;
    let adapter = CsvAdapter::new(data.to_path_buf());

    let symbols = match symbols {
        Some(list) => list
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => adapter.list_symbols()?,
    };
    if symbols.is_empty() {
        return Err(SignalError::Data {
            reason: format!("no symbols found in {}", data.display()),
        });
    }

    info!("Scanning {} symbols with {}", symbols.len(), strategy.kind());
    let series = adapter.load_many(&symbols)?;
    for (symbol, evaluation) in engine::evaluate_many(&series, &strategy, &risk) {
        println!("{}", summary_line(&symbol, &evaluation));
    }
    Ok(())
}

fn run_validate(strategy_path: &Path) -> Result<(), SignalError> {
    let (strategy, risk) = load_strategy(strategy_path)?;

    println!("Strategy: {}", strategy);
    println!(
        "Risk:     atr_window={} multiplier={}",
        risk.atr_window(),
        risk.multiplier()
    );
    println!("\nRules (first match wins, otherwise HOLD):");
    for rule in strategy.rules() {
        println!("  {}", rule);
    }
    let indicators: Vec<String> = strategy
        .required_indicators()
        .iter()
        .map(|t| t.to_string())
        .collect();
    println!("\nIndicators: {}", indicators.join(", "));
    println!("Warm-up:    {} bars", strategy.warmup_bars());
    println!("\nStrategy is valid.");
    Ok(())
}

fn run_features(data: &Path, symbol: &str, output: Option<&Path>) -> Result<(), SignalError> {
    let adapter = CsvAdapter::new(data.to_path_buf());
    let series = adapter.load_series(symbol)?;
    info!("Loaded {} bars for {}", series.len(), symbol);

    let table = build_feature_table(&series, &default_columns());
    match output {
        Some(path) => {
            CsvReportAdapter::new().write_features(symbol, &series, &table, output_str(path)?)?;
            info!("Features written to {}", path.display());
        }
        None => {
            let last = table.row(series.len() - 1);
            for (name, value) in table.names.iter().zip(last) {
                match value {
                    Some(v) => println!("{:<16} {:.6}", name, v),
                    None => println!("{:<16} -", name),
                }
            }
        }
    }
    Ok(())
}
