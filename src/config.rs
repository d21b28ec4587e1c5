use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "frete.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Tariff book file (TOML or JSON).
    pub book: PathBuf,
    /// Tariff version to price against; the book's active version if unset.
    pub version: Option<String>,
    pub output: OutputFormat,
}

impl Settings {
    pub fn load(config_path: &Option<String>) -> Result<Self, SettingsError> {
        let default = Self::default();

        match Self::load_from_file(config_path) {
            Ok(settings) => Ok(settings),
            Err(err) if config_path.is_none() => {
                warn!("Could not read config file: {err}. Using default configuration.",);
                Ok(default)
            }
            Err(err) => Err(err),
        }
    }

    fn load_from_file(config_path: &Option<String>) -> Result<Self, SettingsError> {
        let path = config_path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let config = Config::builder()
            .add_source(File::with_name(path).required(config_path.is_some()))
            .add_source(Environment::with_prefix("FRETE"))
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            book: PathBuf::from("tariffs.toml"),
            version: None,
            output: OutputFormat::Text,
        }
    }
}
