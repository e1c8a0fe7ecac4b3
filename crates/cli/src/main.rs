use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod settings;

use commands::{CsvArgs, PairArgs};

#[derive(Parser)]
#[command(name = "kendall-tau")]
#[command(about = "Kendall's tau-b rank correlation with significance", long_about = None)]
struct Cli {
    /// Config file layered over config/Config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// P-value method: auto, exact, asymptotic
    #[arg(long, global = true)]
    method: Option<String>,

    /// Output format: text, json
    #[arg(long, global = true)]
    format: Option<String>,

    /// Digits after the decimal point in text output
    #[arg(long, global = true)]
    precision: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the built-in sample pairs (default)
    Demo,
    /// Evaluate one pair of comma-separated sequences
    Pair(PairArgs),
    /// Evaluate every pair of numeric columns in a CSV file
    Csv(CsvArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = settings::resolve(
        cli.config.as_deref(),
        settings::Overrides {
            method: cli.method.as_deref(),
            format: cli.format.as_deref(),
            precision: cli.precision,
        },
    )?;

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => commands::run_demo(&config)?,
        Commands::Pair(args) => commands::run_pair(&args, &config)?,
        Commands::Csv(args) => commands::run_csv(&args, &config)?,
    }

    Ok(())
}
