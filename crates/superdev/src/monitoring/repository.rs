use super::{Alert, Metric, MonitoringStats, Trace};
use std::collections::HashMap;
use superdev_core::{AlertId, Metadata, Tags, TraceId};

/// Repository trait for traces, metrics and alerts
///
/// Every operation is infallible. Unknown ids produce an empty result or do
/// nothing; a telemetry call must never fault the caller.
pub trait MonitoringRepository: Send + Sync {
    /// Start a running trace and return its id
    fn start_trace(&self, trace_id: TraceId, name: &str, metadata: Metadata) -> TraceId;

    /// Append a step to an active trace
    fn add_trace_step(&self, trace_id: &TraceId, step_name: &str, data: Metadata);

    /// Finalize an active trace; returns whether it was active
    fn end_trace(&self, trace_id: &TraceId, result: Metadata) -> bool;

    /// Append a metric sample
    fn record_metric(&self, name: &str, value: serde_json::Value, tags: Tags);

    /// Metric samples newer than `hours`, keyed by series name
    fn get_metrics(&self, name: Option<&str>, hours: u32) -> HashMap<String, Vec<Metric>>;

    /// Historical traces started within `hours`, keyed by id
    fn get_traces(&self, trace_id: Option<&TraceId>, hours: u32) -> HashMap<TraceId, Vec<Trace>>;

    /// Create an unacknowledged alert and return its id
    fn create_alert(
        &self,
        alert_type: &str,
        message: &str,
        severity: &str,
        metadata: Metadata,
    ) -> AlertId;

    /// Alerts raised within `hours`, optionally filtered by acknowledgment
    fn get_alerts(&self, acknowledged: Option<bool>, hours: u32) -> Vec<Alert>;

    /// Mark an alert acknowledged; returns whether it was found
    fn acknowledge_alert(&self, alert_id: &AlertId) -> bool;

    /// Counters for the whole store
    fn get_stats(&self) -> MonitoringStats;
}
