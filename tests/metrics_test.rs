//! Metrics emission checks.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::time::Duration;

use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clickup_gateway::telemetry;
use clickup_gateway::{ClickUp, ClickUpGateway, PageOptions, RetryConfig};

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

fn gateway_for(server: &MockServer) -> ClickUpGateway {
    ClickUp::builder()
        .token("pk_test")
        .base_url(server.uri())
        .retry(
            RetryConfig::new()
                .max_attempts(3)
                .initial_delay(Duration::from_millis(1))
                .jitter(false),
        )
        .build()
        .unwrap()
}

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

// ============================================================================
// Tests
// ============================================================================

/// Runs async code within a local recorder scope on the multi-thread runtime.
///
/// `block_in_place` ensures the sync `with_local_recorder` closure stays
/// on the current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn successful_request_records_metrics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"teams": []})))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server);

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(async { gateway.list_workspaces(&PageOptions::default()).await })
        })
    });
    assert!(result.is_ok());

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_total(&snapshot, telemetry::REQUESTS_TOTAL),
        1,
        "expected 1 request counter"
    );
    assert!(
        has_histogram(&snapshot, telemetry::REQUEST_DURATION_SECONDS),
        "expected a duration histogram entry"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn cache_hit_and_miss_counters_track_reads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/space/s1/folder"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"folders": []})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway_for(&server);

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let options = PageOptions::default();
                gateway.list_folders("s1", false, &options).await.unwrap();
                gateway.list_folders("s1", false, &options).await.unwrap();
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
    // The second read never reached the transport.
    assert_eq!(counter_total(&snapshot, telemetry::REQUESTS_TOTAL), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn transient_failures_record_retry_counters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"err": "boom"})))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/team"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"teams": []})))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server);

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(async { gateway.list_workspaces(&PageOptions::default()).await })
        })
    });
    assert!(result.is_ok());

    let snapshot = snapshotter.snapshot().into_vec();

    // Two 500s, two re-attempts, one successful logical call.
    assert_eq!(counter_total(&snapshot, telemetry::RETRIES_TOTAL), 2);
    assert_eq!(counter_total(&snapshot, telemetry::REQUESTS_TOTAL), 1);
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"teams": []})))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let _result = gateway
        .list_workspaces(&PageOptions::default())
        .await
        .unwrap();
}
