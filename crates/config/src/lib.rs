//! Klaxon Configuration
//!
//! TOML-based configuration with sensible defaults. A minimal (even empty)
//! config should just work - only specify what you need to change.
//!
//! # Example Minimal Config
//!
//! ```toml
//! [api]
//! bind = "0.0.0.0:8080"
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [api]
//! bind = "127.0.0.1:8080"
//!
//! [store]
//! max_events = 10000
//! retention_days = 35
//!
//! [classifier]
//! rule = "lenient"            # or "strict-suffix"
//!
//! [pipeline]
//! durability = "best-effort"  # or "required"
//!
//! [bootstrap]
//! window = "PT10M"
//! source = "durable"          # or "recent"
//!
//! [log]
//! level = "info"
//! ```

mod error;
mod sections;

pub use error::{ConfigError, Result};
pub use sections::{
    ApiConfig, BootstrapConfig, ClassifierConfig, LogConfig, PipelineConfig, StoreSection,
};

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api: ApiConfig,
    pub store: StoreSection,
    pub classifier: ClassifierConfig,
    pub pipeline: PipelineConfig,
    pub bootstrap: BootstrapConfig,
    pub log: LogConfig,
}

impl Config {
    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = raw.parse()?;
        Ok(config)
    }

    /// Check cross-field constraints beyond what serde can express
    pub fn validate(&self) -> Result<()> {
        if self.store.max_events == 0 {
            return Err(ConfigError::invalid_value(
                "store",
                "max_events",
                "must be at least 1",
            ));
        }
        if self.store.retention_days == 0 {
            return Err(ConfigError::invalid_value(
                "store",
                "retention_days",
                "must be at least 1",
            ));
        }
        self.api.bind_addr()?;
        self.bootstrap.window()?;
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod config_test;
