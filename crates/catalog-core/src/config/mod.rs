//! Application configuration schemas.
//!
//! Configuration is layered with the `config` crate: an optional TOML
//! file, an optional environment overlay, then `CATALOG__*` environment
//! variables. Every section has defaults so an empty source is valid.

pub mod catalog;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::catalog::CatalogConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration for the named environment.
    ///
    /// Merges `config/default`, `config/{env}` and environment variables
    /// prefixed with `CATALOG`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(Path::new("config"), env)
    }

    /// Like [`AppConfig::load`], reading the files from `dir`.
    pub fn load_from(dir: &Path, env: &str) -> Result<Self, AppError> {
        let default = dir.join("default");
        let overlay = dir.join(env);
        let config = config::Config::builder()
            .add_source(config::File::with_name(&default.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&overlay.to_string_lossy()).required(false))
            .add_source(environment())
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load configuration from an explicit file path plus environment overrides.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn from_file(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(environment())
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("CATALOG")
        .separator("__")
        .try_parsing(true)
}
