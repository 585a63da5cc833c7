//! Configuration management for the demo.

use recdiff_engine::CompareOptions;
use std::env;
use std::str::FromStr;

/// Array keys used when `RECDIFF_ARRAY_KEYS` is unset.
pub const DEFAULT_ARRAY_KEYS: &str = "stock=name";

/// How the delta is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidOutput(other.to_string())),
        }
    }
}

/// Demo configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key columns for keyed array comparison
    pub array_keys: CompareOptions,
    /// Output format
    pub output: OutputFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            env::var("RECDIFF_ARRAY_KEYS").ok().as_deref(),
            env::var("RECDIFF_OUTPUT").ok().as_deref(),
        )
    }

    fn from_vars(array_keys: Option<&str>, output: Option<&str>) -> Result<Self, ConfigError> {
        let array_keys =
            CompareOptions::parse_array_keys(array_keys.unwrap_or(DEFAULT_ARRAY_KEYS))?;

        let output = match output {
            Some(value) => value.parse()?,
            None => OutputFormat::default(),
        };

        Ok(Self { array_keys, output })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid RECDIFF_ARRAY_KEYS value: {0}")]
    InvalidArrayKeys(#[from] recdiff_engine::Error),

    #[error("Invalid RECDIFF_OUTPUT value '{0}': expected text or json")]
    InvalidOutput(String),
}
