use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tk_bert::{BertTarget, ObjectiveEvaluator};
use tk_space::{Space, TuneTarget};
use tk_types::{FileLog, TuneArgs, DEFAULT_LOG_PATH};
use tracing_subscriber::EnvFilter;

/// Builds BERT tuning spaces and scores finished benchmark logs.
#[derive(Parser, Debug)]
#[command(name = "tk-eval")]
#[command(about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print the search space for a JSON object of tuning arguments.
    Space {
        /// e.g. '{"gpus": 8, "slapo": true}'
        args: String,
    },

    /// Score benchmark logs, one JSON line per log.
    Log {
        /// Log files to evaluate.
        #[arg(env = "TK_LOG_PATH", default_value = DEFAULT_LOG_PATH)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Space { args } => print_space(&args),
        Command::Log { paths } => print_objectives(&paths),
    }
}

fn print_space(raw: &str) -> anyhow::Result<()> {
    let args: TuneArgs = serde_json::from_str(raw).context("tuning args must be a JSON object")?;
    let target = BertTarget::new()?;

    let mut space = Space::new();
    target.update_space(&args, &mut space)?;
    println!("{}", serde_json::to_string_pretty(&space)?);
    Ok(())
}

fn print_objectives(paths: &[PathBuf]) -> anyhow::Result<()> {
    let evaluator = ObjectiveEvaluator::new()?;
    let sources: Vec<FileLog> = paths.iter().map(FileLog::new).collect();

    for (result, path) in evaluator.evaluate_many(&sources).into_iter().zip(paths) {
        let result = result.with_context(|| format!("evaluating {}", path.display()))?;
        println!(
            "{}",
            json!({
                "path": path,
                "status": result.status_code(),
                "score": result.score,
            })
        );
    }
    Ok(())
}
