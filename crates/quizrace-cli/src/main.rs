//! quizrace CLI: run a timed quiz from a CSV file.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use quizrace_core::model::TimeLimit;

mod config;
mod prompter;
mod run;

#[derive(Parser)]
#[command(name = "quizrace", version, about = "Timed command-line quiz runner")]
struct Cli {
    /// A CSV file in 'question,answer' format [default: problems.csv]
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Seconds until the exam ends; 0 disables the limit [default: 0]
    #[arg(long)]
    time_limit: Option<u64>,

    /// Config file path (defaults to ./quizrace.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start immediately instead of waiting for Enter
    #[arg(long)]
    no_wait: bool,

    /// Print a per-question review table after the score
    #[arg(long)]
    review: bool,

    /// Print the run summary as JSON after the score
    #[arg(long)]
    json: bool,

    /// Write the run summary as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizrace=warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = try_main(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn try_main(cli: Cli) -> Result<()> {
    let config = config::load_config_from(cli.config.as_deref())?;

    let options = run::RunOptions {
        csv: cli.csv.unwrap_or(config.csv),
        time_limit: TimeLimit::from_secs(cli.time_limit.unwrap_or(config.time_limit_secs)),
        wait_for_start: config.wait_for_start && !cli.no_wait,
        review: cli.review,
        json: cli.json,
        output: cli.output,
    };

    run::execute(options).await
}
