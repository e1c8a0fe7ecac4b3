//! Evaluate a single pair of sequences given on the command line.

use anyhow::{Context, Result};
use clap::Args;
use kendall_core::{AppConfig, KendallEvaluator};

use super::render_result;

/// Arguments for the pair command.
#[derive(Args, Debug, Clone)]
pub struct PairArgs {
    /// First sequence, comma-separated (e.g. "1,2,3")
    #[arg(long, allow_hyphen_values = true)]
    pub x: String,

    /// Second sequence, comma-separated (e.g. "3,2,1")
    #[arg(long, allow_hyphen_values = true)]
    pub y: String,
}

/// Parses a comma-separated list of numbers.
///
/// # Errors
/// Returns an error naming the first field that is not a number.
pub fn parse_values(input: &str) -> Result<Vec<f64>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .enumerate()
        .map(|(i, field)| {
            field
                .parse::<f64>()
                .with_context(|| format!("Value {} is not a number: '{}'", i + 1, field))
        })
        .collect()
}

/// Runs the pair command.
///
/// # Errors
/// Returns an error if either list fails to parse or the pair is malformed.
pub fn run_pair(args: &PairArgs, config: &AppConfig) -> Result<()> {
    let x = parse_values(&args.x).context("Invalid --x")?;
    let y = parse_values(&args.y).context("Invalid --y")?;

    let result = KendallEvaluator::from(&config.evaluator)
        .evaluate(&x, &y)
        .context("Cannot evaluate pair")?;

    println!("{}", render_result(&result, config)?);
    Ok(())
}
