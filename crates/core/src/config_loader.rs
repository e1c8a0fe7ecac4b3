use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

/// Environment variable prefix, e.g. `KENDALL_EVALUATOR__METHOD=exact`.
pub const ENV_PREFIX: &str = "KENDALL_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by merging defaults, `config/Config.toml` and
    /// `KENDALL_`-prefixed environment variables.
    ///
    /// Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration source cannot be parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(None)
    }

    /// Loads configuration, layering an explicit TOML file over
    /// `config/Config.toml` and under the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file does not exist or if any
    /// configuration source cannot be parsed.
    pub fn load_from(path: Option<&Path>) -> Result<AppConfig> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("config/Config.toml"));

        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        let config: AppConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        tracing::debug!(?config, "Configuration loaded");

        Ok(config)
    }
}
