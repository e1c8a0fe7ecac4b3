//! Tau matrix and dependence tree over the numeric columns of a CSV file.

use anyhow::{bail, Context, Result};
use clap::Args;
use kendall_core::{
    AppConfig, DependenceTree, KendallEvaluator, OutputFormat, ResultFormatter, TauEdge,
    TauMatrix,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Arguments for the csv command.
#[derive(Args, Debug, Clone)]
pub struct CsvArgs {
    /// CSV file with a header row
    pub path: PathBuf,

    /// Comma-separated column names to include (default: all)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Also print the maximum spanning dependence tree
    #[arg(long)]
    pub tree: bool,

    /// Also list the N most strongly associated pairs
    #[arg(long)]
    pub top: Option<usize>,
}

/// Named numeric columns read from a CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnData {
    pub names: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

#[derive(Serialize)]
struct CsvReport<'a> {
    matrix: &'a TauMatrix,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<&'a DependenceTree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    strongest: Option<Vec<TauEdge>>,
}

/// Reads the selected columns of a CSV file as numbers.
///
/// # Errors
/// Returns error if the file cannot be read, a selected column does not
/// exist, or a field is not a number.
pub fn load_columns(path: &Path, selected: &[String]) -> Result<ColumnData> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
        .clone();

    let indices: Vec<usize> = if selected.is_empty() {
        (0..headers.len()).collect()
    } else {
        selected
            .iter()
            .map(|name| {
                headers.iter().position(|h| h == name.as_str()).with_context(|| {
                    format!(
                        "Unknown column '{}'. Available: {}",
                        name,
                        headers.iter().collect::<Vec<_>>().join(", ")
                    )
                })
            })
            .collect::<Result<_>>()?
    };

    if indices.is_empty() {
        bail!("CSV file has no columns: {}", path.display());
    }

    let names: Vec<String> = indices.iter().map(|&i| headers[i].to_string()).collect();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); indices.len()];

    for (row, record) in reader.records().enumerate() {
        // header is line 1
        let line = row + 2;
        let record = record.with_context(|| format!("Failed to read CSV line {line}"))?;

        for (column, &index) in columns.iter_mut().zip(&indices) {
            let field = record.get(index).unwrap_or("");
            let value: f64 = field.parse().with_context(|| {
                format!(
                    "Line {}, column '{}': not a number: '{}'",
                    line, &headers[index], field
                )
            })?;
            column.push(value);
        }
    }

    tracing::debug!(
        path = %path.display(),
        columns = names.len(),
        rows = columns.first().map_or(0, Vec::len),
        "Loaded CSV columns"
    );

    Ok(ColumnData { names, columns })
}

/// Runs the csv command.
///
/// # Errors
/// Returns an error if loading fails or the columns cannot be evaluated.
pub fn run_csv(args: &CsvArgs, config: &AppConfig) -> Result<()> {
    let data = load_columns(&args.path, &args.columns)?;
    let evaluator = KendallEvaluator::from(&config.evaluator);
    let matrix = TauMatrix::from_columns(data.names, &data.columns, &evaluator)
        .context("Cannot evaluate CSV columns")?;

    let tree = if args.tree {
        matrix.dependence_tree()
    } else {
        None
    };
    let strongest = args.top.map(|limit| matrix.strongest_pairs(limit));

    match config.output.format {
        OutputFormat::Json => {
            let report = CsvReport {
                matrix: &matrix,
                tree: tree.as_ref(),
                strongest,
            };
            println!("{}", serde_json::to_string(&report)?);
        }
        OutputFormat::Text => {
            let formatter = ResultFormatter::from(&config.output);
            print!("{}", formatter.matrix(&matrix));

            if let Some(tree) = &tree {
                println!();
                println!(
                    "Dependence tree (total |tau| {:.*})",
                    config.output.precision,
                    tree.total_weight()
                );
                print!("{}", formatter.tree(&matrix, tree));
            }

            if let Some(pairs) = &strongest {
                println!();
                println!("Strongest pairs");
                print!("{}", formatter.edges(&matrix, pairs));
            }
        }
    }

    Ok(())
}
