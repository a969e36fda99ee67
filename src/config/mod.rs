//! Application configuration.
//!
//! Settings are read from a TOML file; the database URL can additionally be
//! overridden through the `DATABASE_URL` environment variable (see
//! [`database`]). Everything has a default, so a missing section is fine.

/// Database connection and table creation
pub mod database;

use crate::core::projection::DEFAULT_HORIZON;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// Top-level application configuration.
#[derive(Deserialize, Debug, Default)]
pub struct AppConfig {
    /// Connection URL of the data store; `DATABASE_URL` takes precedence
    #[serde(default)]
    pub database_url: Option<String>,
    /// Credit-limit projection settings
    #[serde(default)]
    pub projection: ProjectionConfig,
}

/// Settings for the limit projector.
#[derive(Deserialize, Debug, Clone)]
pub struct ProjectionConfig {
    /// Months projected ahead when a request does not specify a horizon
    #[serde(default = "default_horizon")]
    pub default_horizon: i32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            default_horizon: default_horizon(),
        }
    }
}

const fn default_horizon() -> i32 {
    DEFAULT_HORIZON
}

/// Loads the application configuration from a TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;
    parse_config(&contents)
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML configuration: {e}"),
    })
}
