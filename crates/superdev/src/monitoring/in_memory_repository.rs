use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use superdev_core::{AlertId, Metadata, SharedClock, SystemClock, Tags, TraceId};
use tracing::warn;

use super::{Alert, Metric, MonitoringRepository, MonitoringStats, Trace, TraceStep};
use crate::config::{DuplicateTracePolicy, MonitoringConfig};

/// Everything the store owns. Guarded as a whole by one lock.
#[derive(Debug, Default)]
struct MonitoringState {
    /// Historical index: every trace snapshot ever started, per id
    traces: HashMap<TraceId, Vec<Trace>>,
    /// Active index: position of the running entry in `traces[id]`
    active_traces: HashMap<TraceId, usize>,
    metrics: HashMap<String, Vec<Metric>>,
    alerts: Vec<Alert>,
    next_alert_seq: u64,
}

/// In-memory implementation of MonitoringRepository
///
/// Clones share the same state. Readers and writers take the same lock, so
/// each call observes and leaves a consistent snapshot.
#[derive(Clone)]
pub struct InMemoryMonitoringRepository {
    state: Arc<Mutex<MonitoringState>>,
    clock: SharedClock,
    duplicate_policy: DuplicateTracePolicy,
}

impl InMemoryMonitoringRepository {
    /// Create a new in-memory repository on the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a new in-memory repository on the given clock
    pub fn with_clock(clock: SharedClock) -> Self {
        Self {
            state: Arc::new(Mutex::new(MonitoringState::default())),
            clock,
            duplicate_policy: DuplicateTracePolicy::default(),
        }
    }

    /// Create a repository configured from `config`
    pub fn from_config(config: &MonitoringConfig, clock: SharedClock) -> Self {
        Self::with_clock(clock).with_duplicate_policy(config.duplicate_trace_policy)
    }

    /// Set how `start_trace` treats an id that is already active
    pub fn with_duplicate_policy(mut self, policy: DuplicateTracePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Oldest excluded instant; saturates at the earliest representable time
    fn cutoff(&self, hours: u32) -> DateTime<Utc> {
        Duration::try_hours(i64::from(hours))
            .and_then(|window| self.clock.now().checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for InMemoryMonitoringRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitoringRepository for InMemoryMonitoringRepository {
    fn start_trace(&self, trace_id: TraceId, name: &str, metadata: Metadata) -> TraceId {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if let Some(index) = state.active_traces.get(&trace_id).copied() {
            match self.duplicate_policy {
                DuplicateTracePolicy::KeepExisting => {
                    warn!(trace_id = %trace_id, "Trace already running, keeping existing run");
                    return trace_id;
                }
                DuplicateTracePolicy::Overwrite => {
                    warn!(trace_id = %trace_id, "Trace already running, discarding previous run");
                    // The abandoned run was never ended, so it is not kept in history.
                    if let Some(history) = state.traces.get_mut(&trace_id) {
                        history.truncate(index);
                    }
                }
            }
        }

        let trace = Trace::start(trace_id.clone(), name, metadata, self.clock.now());
        let history = state.traces.entry(trace_id.clone()).or_default();
        history.push(trace);
        let index = history.len() - 1;
        state.active_traces.insert(trace_id.clone(), index);

        trace_id
    }

    fn add_trace_step(&self, trace_id: &TraceId, step_name: &str, data: Metadata) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let Some(&index) = state.active_traces.get(trace_id) else {
            return;
        };
        if let Some(trace) = state
            .traces
            .get_mut(trace_id)
            .and_then(|history| history.get_mut(index))
        {
            trace.steps.push(TraceStep {
                name: step_name.to_string(),
                timestamp: self.clock.now(),
                data,
            });
        }
    }

    fn end_trace(&self, trace_id: &TraceId, result: Metadata) -> bool {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let Some(index) = state.active_traces.remove(trace_id) else {
            return false;
        };
        match state
            .traces
            .get_mut(trace_id)
            .and_then(|history| history.get_mut(index))
        {
            Some(trace) => {
                trace.complete(self.clock.now(), result);
                true
            }
            None => false,
        }
    }

    fn record_metric(&self, name: &str, value: serde_json::Value, tags: Tags) {
        let mut state = self.state.lock();
        let metric = Metric {
            name: name.to_string(),
            value,
            timestamp: self.clock.now(),
            tags,
        };
        state
            .metrics
            .entry(name.to_string())
            .or_default()
            .push(metric);
    }

    fn get_metrics(&self, name: Option<&str>, hours: u32) -> HashMap<String, Vec<Metric>> {
        let state = self.state.lock();
        let cutoff = self.cutoff(hours);
        let within = |series: &Vec<Metric>| -> Vec<Metric> {
            series
                .iter()
                .filter(|m| m.timestamp > cutoff)
                .cloned()
                .collect()
        };

        match name {
            Some(name) => {
                let series = state.metrics.get(name).map(within).unwrap_or_default();
                HashMap::from([(name.to_string(), series)])
            }
            None => state
                .metrics
                .iter()
                .map(|(name, series)| (name.clone(), within(series)))
                .collect(),
        }
    }

    fn get_traces(&self, trace_id: Option<&TraceId>, hours: u32) -> HashMap<TraceId, Vec<Trace>> {
        let state = self.state.lock();
        let cutoff = self.cutoff(hours);
        let within = |history: &Vec<Trace>| -> Vec<Trace> {
            history
                .iter()
                .filter(|t| t.start_time > cutoff)
                .cloned()
                .collect()
        };

        match trace_id {
            Some(trace_id) => match state.traces.get(trace_id) {
                Some(history) => HashMap::from([(trace_id.clone(), within(history))]),
                None => HashMap::new(),
            },
            None => state
                .traces
                .iter()
                .map(|(id, history)| (id.clone(), within(history)))
                .filter(|(_, filtered)| !filtered.is_empty())
                .collect(),
        }
    }

    fn create_alert(
        &self,
        alert_type: &str,
        message: &str,
        severity: &str,
        metadata: Metadata,
    ) -> AlertId {
        let mut state = self.state.lock();
        let timestamp = self.clock.now();
        let id = AlertId::from_parts(timestamp.timestamp(), state.next_alert_seq);
        state.next_alert_seq += 1;

        state.alerts.push(Alert {
            id: id.clone(),
            alert_type: alert_type.to_string(),
            message: message.to_string(),
            severity: severity.to_string(),
            timestamp,
            metadata,
            acknowledged: false,
        });
        id
    }

    fn get_alerts(&self, acknowledged: Option<bool>, hours: u32) -> Vec<Alert> {
        let state = self.state.lock();
        let cutoff = self.cutoff(hours);
        state
            .alerts
            .iter()
            .filter(|a| a.timestamp > cutoff)
            .filter(|a| acknowledged.is_none_or(|wanted| a.acknowledged == wanted))
            .cloned()
            .collect()
    }

    fn acknowledge_alert(&self, alert_id: &AlertId) -> bool {
        let mut state = self.state.lock();
        match state.alerts.iter_mut().find(|a| &a.id == alert_id) {
            Some(alert) => {
                alert.acknowledged = true;
                true
            }
            None => false,
        }
    }

    fn get_stats(&self) -> MonitoringStats {
        let state = self.state.lock();
        MonitoringStats {
            total_traces: state.traces.values().map(Vec::len).sum(),
            active_traces: state.active_traces.len(),
            total_metrics: state.metrics.values().map(Vec::len).sum(),
            total_alerts: state.alerts.len(),
            unacknowledged_alerts: state.alerts.iter().filter(|a| !a.acknowledged).count(),
            timestamp: self.clock.now(),
        }
    }
}
