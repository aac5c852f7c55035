use chrono::Duration;
use serde_json::{Value, json};
use std::sync::Arc;
use std::thread;
use superdev::{
    InMemoryMonitoringRepository, ManualClock, Metadata, MonitoringService, SuperDevApp,
    TraceId, TraceStatus,
};

/// Create a service on a manual clock
fn create_test_service() -> (MonitoringService, ManualClock) {
    let clock = ManualClock::starting_now();
    let repository = Arc::new(InMemoryMonitoringRepository::with_clock(Arc::new(
        clock.clone(),
    )));
    (MonitoringService::new(repository), clock)
}

fn meta(value: Value) -> Metadata {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn test_running_trace_is_visible_before_end() {
    let (service, _) = create_test_service();
    let id = service.start_trace("t1", "build", None);

    let traces = service.get_traces(Some(&id), None);
    let history = &traces[&id];
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, TraceStatus::Running);
    assert!(history[0].end_time.is_none());
    assert!(history[0].duration.is_none());
    assert!(history[0].result.is_none());
}

#[test]
fn test_end_trace_sets_duration_and_result() {
    let (service, clock) = create_test_service();
    let id = service.start_trace("t1", "build", None);
    clock.advance(Duration::milliseconds(2500));
    service.end_trace(&id, Some(meta(json!({"ok": true}))));

    let trace = &service.get_traces(Some(&id), None)[&id][0];
    assert_eq!(trace.status, TraceStatus::Completed);
    let end_time = trace.end_time.unwrap();
    let expected = (end_time - trace.start_time).num_milliseconds() as f64 / 1000.0;
    assert!((trace.duration.unwrap() - expected).abs() < 1e-6);
    assert_eq!(trace.duration, Some(2.5));
    assert_eq!(trace.result, Some(meta(json!({"ok": true}))));
    assert_eq!(service.get_stats().active_traces, 0);
}

#[test]
fn test_steps_after_end_are_ignored() {
    let (service, _) = create_test_service();
    let id = service.start_trace("t1", "build", None);
    service.add_trace_step(&id, "compile", None);
    service.end_trace(&id, None);
    service.add_trace_step(&id, "late", Some(meta(json!({"x": 1}))));

    let trace = &service.get_traces(Some(&id), None)[&id][0];
    assert_eq!(trace.steps.len(), 1);
    assert_eq!(trace.steps[0].name, "compile");
}

#[test]
fn test_unknown_metric_name_reads_empty() {
    let (service, _) = create_test_service();

    let metrics = service.get_metrics(Some("never-recorded"), None);
    assert!(metrics["never-recorded"].is_empty());
    assert!(service.get_metrics(None, None).is_empty());
    assert_eq!(service.get_stats().total_metrics, 0);
}

#[test]
fn test_metric_window_drops_old_samples() {
    let (service, clock) = create_test_service();
    service.record_metric("latency_ms", 120, None);
    clock.advance(Duration::hours(3));
    service.record_metric("latency_ms", 80, None);

    let recent = service.get_metrics(Some("latency_ms"), Some(2));
    assert_eq!(recent["latency_ms"].len(), 1);
    assert_eq!(recent["latency_ms"][0].value, json!(80));

    let all = service.get_metrics(None, Some(4));
    assert_eq!(all["latency_ms"].len(), 2);

    // Storage is untouched by windowed reads
    assert_eq!(service.get_stats().total_metrics, 2);
}

#[test]
fn test_sample_exactly_at_cutoff_is_excluded() {
    let (service, clock) = create_test_service();
    service.record_metric("cpu", 0.9, None);
    clock.advance(Duration::hours(1));

    assert!(service.get_metrics(Some("cpu"), Some(1))["cpu"].is_empty());
}

#[test]
fn test_metric_tags_and_values_stored_opaquely() {
    let (service, _) = create_test_service();
    let tags = [("region".to_string(), "eu".to_string())].into_iter().collect();
    service.record_metric("status", json!({"nested": [1, 2]}), Some(tags));

    let sample = &service.get_metrics(Some("status"), None)["status"][0];
    assert_eq!(sample.value["nested"][1], 2);
    assert_eq!(sample.tags["region"], "eu");
}

#[test]
fn test_alert_acknowledge_flow() {
    let (service, _) = create_test_service();
    let alert_id = service.create_alert("gpu", "memory high", Some("warning"), None);

    let open = service.get_alerts(Some(false), None);
    assert!(open.iter().any(|a| a.id == alert_id));

    service.acknowledge_alert(&alert_id);

    let acked = service.get_alerts(Some(true), None);
    assert!(acked.iter().any(|a| a.id == alert_id));
    let open = service.get_alerts(Some(false), None);
    assert!(open.iter().all(|a| a.id != alert_id));
    assert_eq!(service.get_alerts(None, None).len(), 1);
}

#[test]
fn test_alert_window() {
    let (service, clock) = create_test_service();
    service.create_alert_default("deploy", "old");
    clock.advance(Duration::hours(25));
    service.create_alert_default("deploy", "new");

    let alerts = service.get_alerts(None, None);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].message, "new");
}

#[test]
fn test_total_alerts_counts_every_creation() {
    let (service, _) = create_test_service();
    let ids: Vec<_> = (0..5)
        .map(|i| service.create_alert("eval", &format!("case {i}"), None, None))
        .collect();
    service.acknowledge_alert(&ids[0]);
    service.acknowledge_alert(&ids[3]);

    let stats = service.get_stats();
    assert_eq!(stats.total_alerts, 5);
    assert_eq!(stats.unacknowledged_alerts, 3);
}

#[test]
fn test_concurrent_record_metric_loses_nothing() {
    let (service, _) = create_test_service();
    let n = 64;

    let handles: Vec<_> = (0..n)
        .map(|i| {
            let service = service.clone();
            thread::spawn(move || service.record_metric("x", i, None))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let metrics = service.get_metrics(Some("x"), Some(24 * 365));
    assert_eq!(metrics["x"].len(), n as usize);

    let mut values: Vec<i64> = metrics["x"]
        .iter()
        .map(|m| m.value.as_i64().unwrap())
        .collect();
    values.sort_unstable();
    assert_eq!(values, (0..n as i64).collect::<Vec<_>>());
}

#[test]
fn test_concurrent_alert_ids_are_unique() {
    let (service, _) = create_test_service();

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let service = service.clone();
            thread::spawn(move || service.create_alert_default("load", "spike"))
        })
        .collect();
    let mut ids: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().to_string())
        .collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 32);
}

#[test]
fn test_build_scenario() {
    let (service, _) = create_test_service();
    let id = TraceId::from("t1");

    service.start_trace(id.clone(), "build", None);
    service.add_trace_step(&id, "compile", Some(meta(json!({"rc": 0}))));
    service.end_trace(&id, Some(meta(json!({"ok": true}))));

    let traces = service.get_traces(Some(&id), None);
    assert_eq!(traces.len(), 1);
    let history = &traces[&id];
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].name, "build");
    assert_eq!(history[0].steps.len(), 1);
    assert_eq!(history[0].steps[0].name, "compile");
    assert_eq!(history[0].steps[0].data, meta(json!({"rc": 0})));
    assert_eq!(history[0].result, Some(meta(json!({"ok": true}))));
}

#[test]
fn test_unknown_trace_reads_empty() {
    let (service, _) = create_test_service();
    service.start_trace("known", "build", None);

    assert!(service.get_traces(Some(&TraceId::from("unknown")), None).is_empty());
}

#[test]
fn test_app_shares_one_store_between_handles() {
    let app = SuperDevApp::builder("superdev").build().unwrap();
    let writer = app.monitoring().clone();
    let reader = app.monitoring().clone();

    let id = writer.start_trace("agent-run", "evaluate", None);
    writer.end_trace(&id, None);

    let stats = reader.get_stats();
    assert_eq!(stats.total_traces, 1);
    assert_eq!(stats.active_traces, 0);
    assert_eq!(app.status().monitoring.total_traces, 1);
}

#[test]
fn test_stats_serialize_for_reporting() {
    let (service, _) = create_test_service();
    service.start_trace("t1", "build", None);
    service.record_metric("m", 1, None);

    let json = serde_json::to_value(service.get_stats()).unwrap();
    assert_eq!(json["total_traces"], 1);
    assert_eq!(json["active_traces"], 1);
    assert_eq!(json["total_metrics"], 1);
    assert_eq!(json["total_alerts"], 0);
    assert_eq!(json["unacknowledged_alerts"], 0);
    assert!(json["timestamp"].is_string());
}
