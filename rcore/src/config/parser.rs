//! Runtime configuration loading
//!
//! Configurations are TOML documents, e.g.
//!
//! ```toml
//! [substitute]
//! max_depth = 2000
//! global_env_as_never = true
//! ```

use super::types::RuntimeConfig;
use crate::runtime::error::RuntimeError;
use std::path::Path;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for field '{0}': {1}")]
    InvalidValue(String, String),
}

impl From<ConfigError> for RuntimeError {
    fn from(err: ConfigError) -> Self {
        RuntimeError::Config(err.to_string())
    }
}

impl RuntimeConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<RuntimeConfig, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RuntimeConfig, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("loading runtime config from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.substitute.max_depth == 0 {
            return Err(ConfigError::InvalidValue(
                "substitute.max_depth".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
