mod calculator;
mod config;
mod repl;
mod session;

use calculator::{Evaluator, format_display};
use clap::Parser;
use config::Config;
use session::CalculatorSession;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// An engineering calculator for the terminal with expression history.
#[derive(Debug, Parser)]
#[command(name = "engcalc", version, about)]
struct Args {
    /// Expression to evaluate in one-shot mode; omit for the interactive shell.
    expression: Option<String>,

    /// Print the one-shot result as JSON.
    #[arg(long)]
    json: bool,

    /// Start in engineering mode.
    #[arg(long)]
    engineering: bool,

    /// Start with the dark theme.
    #[arg(long)]
    dark: bool,

    /// Retain at most N history entries.
    #[arg(long, value_name = "N")]
    history_limit: Option<usize>,

    /// Use an alternate config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    debug!(?config, "loaded configuration");

    if let Some(expression) = &args.expression {
        return run_once(expression, args.json);
    }

    let mut session = CalculatorSession::new()
        .with_engineering(args.engineering || config.engineering)
        .with_dark(args.dark || config.dark);
    if let Some(limit) = args.history_limit.or(config.history_limit) {
        session = session.with_history_limit(limit);
    }

    repl::run(&mut session)
}

/// Evaluate a single expression and print the result.
fn run_once(expression: &str, json: bool) -> anyhow::Result<()> {
    let value = Evaluator::new().evaluate(expression)?;
    let display = format_display(value);

    if json {
        let result = serde_json::json!({
            "input": expression,
            "value": value,
            "display": display,
        });
        println!("{result}");
    } else {
        println!("{display}");
    }

    Ok(())
}
