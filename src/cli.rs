//! CLI definition and dispatch.
//!
//! Stage progress goes to stderr, the report itself to stdout (and to the
//! push topic unless `--no-notify`).

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvDirAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::ntfy_adapter::NtfyAdapter;
use crate::adapters::stdout_notify::StdoutNotify;
use crate::adapters::stooq_adapter::StooqAdapter;
use crate::domain::config::RunConfig;
use crate::domain::error::LsbotError;
use crate::domain::report::{evaluate_all, render};
use crate::ports::data_port::MarketDataPort;
use crate::ports::notify_port::NotifyPort;

#[derive(Parser, Debug)]
#[command(name = "lsbot", about = "Trend-following signal notifier for the LS strategy family")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch prices, evaluate every generation, and push the report
    Run {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Read prices from a local CSV directory instead of Stooq
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Print the report without pushing it
        #[arg(long)]
        no_notify: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            data_dir,
            no_notify,
        } => run_signals(config.as_ref(), data_dir, no_notify),
        Command::Validate { config } => run_validate(&config),
    }
}

fn load_run_config(path: Option<&PathBuf>) -> Result<RunConfig, LsbotError> {
    match path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            let adapter =
                FileConfigAdapter::from_file(path).map_err(|e| LsbotError::ConfigParse {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            RunConfig::from_port(&adapter)
        }
        None => Ok(RunConfig::default()),
    }
}

fn run_signals(
    config_path: Option<&PathBuf>,
    data_dir: Option<PathBuf>,
    no_notify: bool,
) -> ExitCode {
    let config = match load_run_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port: Box<dyn MarketDataPort> = match data_dir {
        Some(dir) => {
            eprintln!("Reading prices from {}", dir.display());
            Box::new(CsvDirAdapter::new(dir))
        }
        None => match StooqAdapter::new(config.retries, config.retry_delay) {
            Ok(adapter) => Box::new(adapter),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    let notifier: Box<dyn NotifyPort> = if no_notify {
        Box::new(StdoutNotify)
    } else {
        match NtfyAdapter::new(&config.ntfy_topic) {
            Ok(adapter) => Box::new(adapter),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    };

    let end = Local::now().date_naive();
    let start = end - chrono::Duration::days(config.lookback_years as i64 * 365);

    match run_pipeline(data_port.as_ref(), notifier.as_ref(), &config, start, end) {
        Ok(report) => {
            if !no_notify {
                // Mirror the pushed report on stdout for the job log.
                println!("{report}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Fetch, evaluate, render, deliver. Returns the rendered report so the
/// caller can mirror it. Total fetch failure is itself pushed to the topic
/// before the error propagates.
pub fn run_pipeline(
    data_port: &dyn MarketDataPort,
    notifier: &dyn NotifyPort,
    config: &RunConfig,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<String, LsbotError> {
    eprintln!(
        "Fetching {} symbols, {} to {}",
        config.symbols.len(),
        start,
        end
    );

    let outcome = match data_port.fetch_daily_closes(&config.symbols, start, end) {
        Ok(outcome) => outcome,
        Err(e) => {
            let _ = notifier.send(&format!("Error: {e}"));
            return Err(e);
        }
    };

    for symbol in outcome.failed() {
        eprintln!("warning: no data for {symbol}");
    }

    let table = outcome.table();
    let as_of = table.as_of().ok_or_else(|| LsbotError::AllSymbolsFailed {
        symbols: config.symbols.join(", "),
    })?;

    eprintln!(
        "Evaluating signals as of {as_of} ({})",
        table.symbols().collect::<Vec<_>>().join(", ")
    );
    let readout = evaluate_all(table, as_of);
    let report = render(&readout);

    notifier.send(&report)?;
    Ok(report)
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    match load_run_config(Some(config_path)) {
        Ok(config) => {
            println!(
                "Config OK: {} symbols, {}y lookback, topic \"{}\"",
                config.symbols.len(),
                config.lookback_years,
                config.ntfy_topic
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
