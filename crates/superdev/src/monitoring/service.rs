use super::{Alert, Metric, MonitoringRepository, MonitoringStats, Trace};
use crate::config::MonitoringConfig;
use std::collections::HashMap;
use std::sync::Arc;
use superdev_core::{AlertId, Metadata, Tags, TraceId};
use tracing::{debug, info, trace, warn};

const DEFAULT_SEVERITY: &str = "info";
const CRITICAL_SEVERITY: &str = "critical";

/// Service for recording traces, metrics and alerts
///
/// Cheap to clone; clones share the underlying repository.
#[derive(Clone)]
pub struct MonitoringService {
    repository: Arc<dyn MonitoringRepository>,
    config: MonitoringConfig,
}

impl MonitoringService {
    /// Create a new MonitoringService
    pub fn new(repository: Arc<dyn MonitoringRepository>) -> Self {
        Self {
            repository,
            config: MonitoringConfig::default(),
        }
    }

    /// Create a new MonitoringService with config
    pub fn with_config(
        repository: Arc<dyn MonitoringRepository>,
        config: MonitoringConfig,
    ) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &MonitoringConfig {
        &self.config
    }

    fn window(&self, hours: Option<u32>) -> u32 {
        hours.unwrap_or(self.config.default_window_hours)
    }

    /// Start a trace
    pub fn start_trace(
        &self,
        trace_id: impl Into<TraceId>,
        name: &str,
        metadata: Option<Metadata>,
    ) -> TraceId {
        let trace_id = self
            .repository
            .start_trace(trace_id.into(), name, metadata.unwrap_or_default());
        debug!(trace_id = %trace_id, name, "Trace started");
        trace_id
    }

    /// Start a trace under a freshly generated id
    pub fn start_new_trace(&self, name: &str, metadata: Option<Metadata>) -> TraceId {
        self.start_trace(TraceId::new(), name, metadata)
    }

    /// Add a step to a running trace
    pub fn add_trace_step(&self, trace_id: &TraceId, step_name: &str, data: Option<Metadata>) {
        self.repository.add_trace_step(trace_id, step_name, data.unwrap_or_default());
    }

    /// End a running trace; unknown or already ended ids are ignored
    pub fn end_trace(&self, trace_id: &TraceId, result: Option<Metadata>) {
        if self.repository.end_trace(trace_id, result.unwrap_or_default()) {
            debug!(trace_id = %trace_id, "Trace ended");
        } else {
            debug!(trace_id = %trace_id, "End ignored, trace not running");
        }
    }

    /// Record a metric sample
    pub fn record_metric(
        &self,
        name: &str,
        value: impl Into<serde_json::Value>,
        tags: Option<Tags>,
    ) {
        let value = value.into();
        trace!(metric = name, %value, "Metric recorded");
        self.repository.record_metric(name, value, tags.unwrap_or_default());
    }

    /// Metrics within the last `hours` (config default when None)
    pub fn get_metrics(
        &self,
        name: Option<&str>,
        hours: Option<u32>,
    ) -> HashMap<String, Vec<Metric>> {
        self.repository.get_metrics(name, self.window(hours))
    }

    /// Traces started within the last `hours` (config default when None)
    pub fn get_traces(
        &self,
        trace_id: Option<&TraceId>,
        hours: Option<u32>,
    ) -> HashMap<TraceId, Vec<Trace>> {
        self.repository.get_traces(trace_id, self.window(hours))
    }

    /// Create an alert
    ///
    /// `severity` defaults to "info".
    pub fn create_alert(
        &self,
        alert_type: &str,
        message: &str,
        severity: Option<&str>,
        metadata: Option<Metadata>,
    ) -> AlertId {
        let severity = severity.unwrap_or(DEFAULT_SEVERITY);
        let alert_id = self.repository.create_alert(
            alert_type,
            message,
            severity,
            metadata.unwrap_or_default(),
        );

        if severity == CRITICAL_SEVERITY {
            warn!(alert_id = %alert_id, alert_type, message, "Critical alert raised");
        } else {
            info!(alert_id = %alert_id, alert_type, severity, "Alert raised");
        }
        alert_id
    }

    /// Create an info alert without metadata
    pub fn create_alert_default(&self, alert_type: &str, message: &str) -> AlertId {
        self.create_alert(alert_type, message, None, None)
    }

    /// Alerts raised within the last `hours`, optionally by acknowledgment state
    pub fn get_alerts(&self, acknowledged: Option<bool>, hours: Option<u32>) -> Vec<Alert> {
        self.repository.get_alerts(acknowledged, self.window(hours))
    }

    /// Acknowledge an alert; unknown ids are ignored
    pub fn acknowledge_alert(&self, alert_id: &AlertId) {
        if self.repository.acknowledge_alert(alert_id) {
            debug!(alert_id = %alert_id, "Alert acknowledged");
        } else {
            debug!(alert_id = %alert_id, "Acknowledge ignored, alert not found");
        }
    }

    /// Store-wide counters
    pub fn get_stats(&self) -> MonitoringStats {
        self.repository.get_stats()
    }
}
