//! Application layer for SuperDev
//!
//! Owns the monitoring handle. Anything that needs to record telemetry gets a
//! clone of [`SuperDevApp::monitoring`] passed in; there is no global store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use superdev_core::{SharedClock, SystemClock};

use crate::config::SuperDevConfig;
use crate::error::{Result, SuperDevError};
use crate::logging;
use crate::monitoring::{
    InMemoryMonitoringRepository, MonitoringRepository, MonitoringService, MonitoringStats,
};

/// The main SuperDev application
pub struct SuperDevApp {
    monitoring: MonitoringService,
    clock: SharedClock,
    config: SuperDevConfig,
    metadata: AppMetadata,
}

/// Metadata about the SuperDev application
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppMetadata {
    pub name: String,
    pub version: String,
}

/// Snapshot of the running application
#[derive(Debug, Clone, Serialize)]
pub struct AppStatus {
    pub name: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub monitoring: MonitoringStats,
}

impl SuperDevApp {
    /// Create a new builder
    pub fn builder(name: impl Into<String>) -> SuperDevAppBuilder {
        SuperDevAppBuilder::new(name)
    }

    /// Monitoring handle
    pub fn monitoring(&self) -> &MonitoringService {
        &self.monitoring
    }

    /// Get app metadata
    pub fn metadata(&self) -> &AppMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &SuperDevConfig {
        &self.config
    }

    /// Install the global tracing subscriber at the configured `log_level`
    pub fn init_logging(&self) -> Result<()> {
        logging::init_logging(&self.config.log_level)
    }

    /// Current status, including monitoring counters
    pub fn status(&self) -> AppStatus {
        AppStatus {
            name: self.metadata.name.clone(),
            version: self.metadata.version.clone(),
            timestamp: self.clock.now(),
            monitoring: self.monitoring.get_stats(),
        }
    }
}

/// Builder for creating SuperDev applications
pub struct SuperDevAppBuilder {
    name: String,
    version: String,
    config: SuperDevConfig,
    clock: Option<SharedClock>,
    repository: Option<Arc<dyn MonitoringRepository>>,
}

impl SuperDevAppBuilder {
    /// Create a new builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: SuperDevConfig::default(),
            clock: None,
            repository: None,
        }
    }

    /// Set the version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the configuration
    pub fn config(mut self, config: SuperDevConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the time source used for timestamps and windows
    pub fn clock(mut self, clock: SharedClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use a custom monitoring repository instead of the in-memory one
    pub fn repository(mut self, repository: Arc<dyn MonitoringRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the application
    pub fn build(self) -> Result<SuperDevApp> {
        if self.name.trim().is_empty() {
            return Err(SuperDevError::Build("Application name is empty".to_string()));
        }
        self.config.validate()?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let repository = self.repository.unwrap_or_else(|| {
            Arc::new(InMemoryMonitoringRepository::from_config(
                &self.config.monitoring,
                clock.clone(),
            ))
        });
        let monitoring = MonitoringService::with_config(repository, self.config.monitoring.clone());

        Ok(SuperDevApp {
            monitoring,
            clock,
            config: self.config,
            metadata: AppMetadata {
                name: self.name,
                version: self.version,
            },
        })
    }
}
