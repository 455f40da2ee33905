//! Configuration sections

use std::net::SocketAddr;

use chrono::Duration;
use serde::Deserialize;

use klaxon_classify::DetectionRule;
use klaxon_pipeline::{BootstrapSource, Durability};
use klaxon_store::{StoreConfig, Window};

use crate::{ConfigError, Result};

/// HTTP surface settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Bind address for the HTTP server
    pub bind: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::invalid_value("api", "bind", format!("'{}' is not a socket address", self.bind)))
    }
}

/// Recent store bounds
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub max_events: usize,
    pub retention_days: u32,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            max_events: klaxon_store::DEFAULT_MAX_EVENTS,
            retention_days: klaxon_store::DEFAULT_RETENTION_DAYS as u32,
        }
    }
}

impl StoreSection {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            max_events: self.max_events,
            retention: Duration::days(i64::from(self.retention_days)),
        }
    }
}

/// Classifier strategy selection
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    pub rule: DetectionRule,
}

/// Pipeline delivery policy
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub durability: Durability,
}

/// Bootstrap replay settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    /// ISO-8601 duration, e.g. "PT10M"
    pub window: String,
    pub source: BootstrapSource,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            window: "PT10M".to_string(),
            source: BootstrapSource::default(),
        }
    }
}

impl BootstrapConfig {
    pub fn window(&self) -> Result<Window> {
        self.window
            .parse()
            .map_err(|err| ConfigError::invalid_value("bootstrap", "window", format!("{err}")))
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Filter directive for the tracing subscriber
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
