use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::SuperDevError;

/// SuperDev configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuperDevConfig {
    /// Log level
    pub log_level: String,

    /// Monitoring store configuration
    pub monitoring: MonitoringConfig,
}

impl Default for SuperDevConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl SuperDevConfig {
    /// Load from configuration file
    ///
    /// `.toml` files are parsed as TOML, anything else as JSON.
    pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?,
            _ => serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the monitoring store cannot work with
    pub fn validate(&self) -> Result<(), SuperDevError> {
        if self.monitoring.default_window_hours == 0 {
            return Err(SuperDevError::InvalidConfig(
                "monitoring.default_window_hours must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Monitoring store configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Window applied to reads when the caller does not pass `hours`
    pub default_window_hours: u32,

    /// What `start_trace` does with an id that is already running
    pub duplicate_trace_policy: DuplicateTracePolicy,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            default_window_hours: 24,
            duplicate_trace_policy: DuplicateTracePolicy::default(),
        }
    }
}

/// Handling of `start_trace` for an id that is already running
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DuplicateTracePolicy {
    /// Replace the running entry; its steps are lost
    #[default]
    Overwrite,
    /// Leave the running entry alone and return its id
    KeepExisting,
}
