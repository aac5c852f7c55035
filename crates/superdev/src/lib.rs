//! Main crate for SuperDevAgent monitoring
//!
//! Thread-safe, in-memory bookkeeping of traces, metric samples and alerts,
//! with time-windowed reads. The store never fails: unknown ids give empty
//! results or are ignored.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod monitoring;

// Re-export core types
pub use superdev_core::{
    AlertId, Clock, ManualClock, Metadata, SharedClock, SystemClock, Tags, TraceId,
};

// Re-export app types
pub use app::{AppMetadata, AppStatus, SuperDevApp, SuperDevAppBuilder};

// Re-export config types
pub use config::{DuplicateTracePolicy, MonitoringConfig, SuperDevConfig};

// Re-export error types
pub use error::{Result as SuperDevResult, SuperDevError};

// Re-export monitoring types
pub use monitoring::{
    Alert, InMemoryMonitoringRepository, Metric, MonitoringRepository, MonitoringService,
    MonitoringStats, Trace, TraceStatus, TraceStep,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::SuperDevApp;
    pub use crate::monitoring::MonitoringService;
    pub use superdev_core::{AlertId, Metadata, TraceId};
}
