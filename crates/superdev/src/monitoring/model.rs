use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use superdev_core::{AlertId, Metadata, Tags, TraceId};

/// Trace status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TraceStatus {
    /// Started and not yet ended
    Running,
    /// Ended; duration and result are set
    Completed,
}

/// A single timestamped event recorded within a trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub data: Metadata,
}

/// Recorded lifecycle of one logical operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub id: TraceId,
    pub name: String,
    pub start_time: DateTime<Utc>,
    /// None while running
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds between start and end, None while running
    pub duration: Option<f64>,
    pub steps: Vec<TraceStep>,
    pub metadata: Metadata,
    pub status: TraceStatus,
    pub result: Option<Metadata>,
}

impl Trace {
    /// Create a running trace
    pub fn start(
        id: TraceId,
        name: impl Into<String>,
        metadata: Metadata,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_time,
            end_time: None,
            duration: None,
            steps: Vec::new(),
            metadata,
            status: TraceStatus::Running,
            result: None,
        }
    }

    /// Finalize the trace at `end_time`
    pub(crate) fn complete(&mut self, end_time: DateTime<Utc>, result: Metadata) {
        let elapsed = end_time - self.start_time;
        self.duration = Some(
            elapsed
                .num_microseconds()
                .map(|us| us as f64 / 1_000_000.0)
                .unwrap_or_else(|| elapsed.num_milliseconds() as f64 / 1_000.0),
        );
        self.end_time = Some(end_time);
        self.status = TraceStatus::Completed;
        self.result = Some(result);
    }
}

/// A timestamped named sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    /// Stored as given, no validation
    pub value: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub tags: Tags,
}

/// A notification that can be acknowledged once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub message: String,
    /// Free-form, e.g. "info", "warning", "critical"
    pub severity: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: Metadata,
    pub acknowledged: bool,
}

/// Point-in-time counters for the whole store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringStats {
    /// Every historical trace entry, summed over all ids
    pub total_traces: usize,
    pub active_traces: usize,
    /// Every metric sample, summed over all series
    pub total_metrics: usize,
    pub total_alerts: usize,
    pub unacknowledged_alerts: usize,
    pub timestamp: DateTime<Utc>,
}
