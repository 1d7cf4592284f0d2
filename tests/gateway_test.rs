use std::time::Duration;

use clickup_gateway::{
    ClickUp, ClickUpError, ClickUpGateway, CreateTask, GatewayConfig, OutputMode, PageOptions,
    RetryConfig, TaskFilter,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

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

fn tasks_body(n: usize) -> serde_json::Value {
    let tasks: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "id": format!("t{i}"),
                "name": format!("Task {i}"),
                "status": {"status": "open"}
            })
        })
        .collect();
    json!({"tasks": tasks})
}

#[tokio::test]
async fn presents_bearer_token_on_every_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team"))
        .and(header("Authorization", "pk_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"teams": []})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let out = gateway
        .list_workspaces(&PageOptions::default())
        .await
        .unwrap();
    assert_eq!(out, "No workspaces found.");
}

#[tokio::test]
async fn repeated_read_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/space/s1/folder"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"folders": [{"id": "f1", "name": "Plans"}]})),
        )
        .expect(1) // second call must not reach the network
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let options = PageOptions::default();
    let first = gateway.list_folders("s1", false, &options).await.unwrap();
    let second = gateway.list_folders("s1", false, &options).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn transient_server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list/9/task"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"err": "boom"})))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/list/9/task"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tasks_body(1)))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let out = gateway
        .list_tasks("9", &TaskFilter::default(), &PageOptions::default())
        .await
        .unwrap();
    assert!(out.contains("Task 0"));
}

#[tokio::test]
async fn client_errors_are_not_retried_and_keep_diagnostics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/task/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"err": "Task not found", "ECODE": "ITEM_013"})),
        )
        .expect(1) // a 4xx must consume exactly one attempt
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .get_task("missing", false, OutputMode::Compact)
        .await
        .unwrap_err();
    match err {
        ClickUpError::Api {
            status,
            message,
            err_code,
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Task not found");
            assert_eq!(err_code.as_deref(), Some("ITEM_013"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn auth_failures_map_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"err": "no"})))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .list_workspaces(&PageOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClickUpError::AuthenticationFailed));
}

#[tokio::test]
async fn remote_rate_limit_surfaces_after_exhaustion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_json(json!({"err": "slow down"})),
        )
        .expect(3) // transient, so the full retry budget is spent
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .list_workspaces(&PageOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClickUpError::RateLimited { .. }));
}

#[tokio::test]
async fn missing_capability_maps_to_capability_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team"))
        .respond_with(
            ResponseTemplate::new(402).set_body_json(json!({"err": "plan does not allow this"})),
        )
        .expect(1) // permanent, no retry
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .list_workspaces(&PageOptions::default())
        .await
        .unwrap_err();
    match err {
        ClickUpError::Capability { endpoint, message } => {
            assert!(endpoint.contains("/team"));
            assert_eq!(message, "plan does not allow this");
        }
        other => panic!("expected Capability error, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_upstream_hits_the_call_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"teams": []}))
                .set_delay(Duration::from_secs(30)),
        )
        .expect(1) // the deadline is terminal, so no second attempt
        .mount(&server)
        .await;

    let config = GatewayConfig {
        request_timeout: Duration::from_secs(5),
        call_deadline: Duration::from_secs(5),
        // If a retry were attempted its backoff would outlast the deadline,
        // so the first attempt is the only one that can reach the wire.
        retry: RetryConfig::new()
            .max_attempts(3)
            .initial_delay(Duration::from_secs(60))
            .jitter(false),
        ..GatewayConfig::default()
    };
    let gateway = ClickUp::builder()
        .token("pk_test")
        .config(config)
        .base_url(server.uri())
        .build()
        .unwrap();

    let err = gateway
        .list_workspaces(&PageOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClickUpError::DeadlineExceeded));
}

#[tokio::test]
async fn mutation_invalidates_cached_reads_of_the_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list/9/task"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tasks_body(1)))
        .expect(2) // fresh fetch required after the create
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/list/9/task"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "t9", "name": "New", "url": "u"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let options = PageOptions::default();
    let filter = TaskFilter::default();

    gateway.list_tasks("9", &filter, &options).await.unwrap();
    gateway
        .create_task("9", &CreateTask::new("New"))
        .await
        .unwrap();
    gateway.list_tasks("9", &filter, &options).await.unwrap();
}

#[tokio::test]
async fn delete_handles_empty_204_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/task/t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let out = gateway.delete_task("t1").await.unwrap();
    assert!(out.contains("t1"));
}

#[tokio::test]
async fn filters_become_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list/9/task"))
        .and(query_param("archived", "false"))
        .and(query_param("include_closed", "true"))
        .and(query_param("statuses[]", "open"))
        .and(query_param("due_date_lt", "1700000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tasks_body(0)))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let filter = TaskFilter {
        include_closed: true,
        statuses: vec!["open".into()],
        due_date_lt: Some(1_700_000_000_000),
        ..TaskFilter::default()
    };
    let out = gateway
        .list_tasks("9", &filter, &PageOptions::default())
        .await
        .unwrap();
    assert_eq!(out, "No tasks found.");
}

#[tokio::test]
async fn unexpected_envelope_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"spaces": []})))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .list_workspaces(&PageOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClickUpError::UnexpectedShape { .. }));
}

#[tokio::test]
async fn concurrent_reads_share_one_upstream_fetch_after_warmup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/space/s1/folder"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"folders": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = std::sync::Arc::new(gateway_for(&server));
    gateway
        .list_folders("s1", false, &PageOptions::default())
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let gateway = gateway.clone();
        handles.push(tokio::spawn(async move {
            gateway
                .list_folders("s1", false, &PageOptions::default())
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
}
