mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use clap::error::ErrorKind;
use tabeval_eval::{EvalError, EvaluateOptions, EvaluationEngine, render_report};
use thiserror::Error;

const USAGE: &str = "Usage: tabeval <ai_table_path> <ground_truth_path>";

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "tabeval",
    version,
    about = "Score an AI-annotated CSV table against its ground truth"
)]
struct Cli {
    /// CSV table produced by the annotator.
    #[arg(value_name = "AI_TABLE_PATH")]
    ai_table: PathBuf,
    /// CSV table holding the expected labels.
    #[arg(value_name = "GROUND_TRUTH_PATH")]
    ground_truth: PathBuf,
    /// TOML file with evaluation options.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Write machine-readable metrics to this JSON file.
    #[arg(long, value_name = "PATH")]
    metrics_out: Option<PathBuf>,
    /// Append structured JSON logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Minimum level written to the log file.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Digits after the decimal point in the report.
    #[arg(long, value_name = "N")]
    decimals: Option<usize>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                return match err.print() {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(_) => ExitCode::from(1),
                };
            }
            _ => {
                println!("{USAGE}");
                return ExitCode::from(1);
            }
        },
    };

    match run(cli) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            println!("Error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let Cli {
        ai_table,
        ground_truth,
        config,
        metrics_out,
        log_file,
        log_level,
        decimals,
    } = cli;

    if let Some(path) = &log_file {
        logging::init_file_logging(path, &log_level)?;
    }

    let mut options = match &config {
        Some(path) => config::load_options(path)?,
        None => EvaluateOptions::default(),
    };
    if let Some(decimals) = decimals {
        options.decimals = decimals;
    }
    if metrics_out.is_some() {
        options.metrics_out = metrics_out;
    }

    tracing::info!(
        event = "run_started",
        ai_table = %ai_table.display(),
        ground_truth = %ground_truth.display(),
        decimals = options.decimals,
    );
    let timer = Instant::now();

    let engine = EvaluationEngine::new(options);
    let result = engine.run(&ai_table, &ground_truth)?;
    let report = render_report(&result, engine.options().decimals);

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    Ok(report)
}
