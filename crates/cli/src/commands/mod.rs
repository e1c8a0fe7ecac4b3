//! CLI commands for Kendall's tau evaluation.

pub mod csv_matrix;
pub mod demo;
pub mod pair;

pub use csv_matrix::{run_csv, CsvArgs};
pub use demo::run_demo;
pub use pair::{run_pair, PairArgs};

use anyhow::Result;
use kendall_core::{AppConfig, KendallTau, OutputFormat, ResultFormatter};

/// Renders one result in the configured output format.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render_result(result: &KendallTau, config: &AppConfig) -> Result<String> {
    let formatter = ResultFormatter::from(&config.output);
    match config.output.format {
        OutputFormat::Text => Ok(formatter.pair(result)),
        OutputFormat::Json => Ok(formatter.json(result)?),
    }
}
