//! Integration tests for the API server router


use serde_json::Value;

use test_utils::TestApiServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "alphapilot-dashboard-core");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(
        body.contains("http_requests_total"),
        "Expected http_requests_total metric"
    );
    assert!(
        body.contains("http_request_duration_seconds"),
        "Expected http_request_duration_seconds metric"
    );
    assert!(
        body.contains("snapshot_runs_total"),
        "Expected snapshot_runs_total metric"
    );
}

#[tokio::test]
async fn http_requests_are_counted() {
    let app = TestApiServer::new().await;
    let before = app.metrics.http_requests_total.get();
    app.server.get("/health").await;
    app.server.get("/health").await;
    assert!(app.metrics.http_requests_total.get() >= before + 2);
}

#[tokio::test]
async fn summary_requires_a_database() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/summary").await;
    assert_eq!(response.status_code(), 503);
}

#[tokio::test]
async fn market_history_requires_a_database() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/market/VOO").await;
    assert_eq!(response.status_code(), 503);
}

#[tokio::test]
async fn macro_history_requires_a_database() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/macro").await;
    assert_eq!(response.status_code(), 503);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/strategies").await;
    assert_eq!(response.status_code(), 404);
}
