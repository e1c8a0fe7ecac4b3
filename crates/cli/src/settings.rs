//! Merges loaded configuration with command-line overrides.

use anyhow::{Context, Result};
use kendall_core::{AppConfig, ConfigLoader, OutputFormat, PValueMethod};
use std::path::Path;

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides<'a> {
    pub method: Option<&'a str>,
    pub format: Option<&'a str>,
    pub precision: Option<usize>,
}

/// Loads configuration and applies command-line overrides on top.
///
/// # Errors
/// Returns an error if configuration cannot be loaded or an override does
/// not parse.
pub fn resolve(config_path: Option<&Path>, overrides: Overrides<'_>) -> Result<AppConfig> {
    let config = ConfigLoader::load_from(config_path).context("Failed to load configuration")?;
    apply(config, overrides)
}

fn apply(mut config: AppConfig, overrides: Overrides<'_>) -> Result<AppConfig> {
    if let Some(method) = overrides.method {
        config.evaluator.method = method.parse::<PValueMethod>()?;
    }
    if let Some(format) = overrides.format {
        config.output.format = format.parse::<OutputFormat>()?;
    }
    if let Some(precision) = overrides.precision {
        config.output.precision = precision;
    }

    tracing::debug!(
        method = %config.evaluator.method,
        exact_threshold = config.evaluator.exact_threshold,
        format = %config.output.format,
        precision = config.output.precision,
        "Resolved settings"
    );

    Ok(config)
}
