mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/admin/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let server = common::create_failing_server();

    let response = server.get("/admin/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "error");
}

#[tokio::test]
async fn test_metrics_endpoint_reports_link_counters() {
    let (server, _store) = common::create_test_server();

    server
        .post("/metered")
        .json(&serde_json::json!({
            "url": "https://example.com",
            "admin_pw": "pw"
        }))
        .await
        .assert_status_ok();
    server.get("/metered").await.assert_status(StatusCode::FOUND);

    let response = server.get("/admin/metrics").await;

    response.assert_status_ok();
    assert!(response.header("content-type").to_str().unwrap().starts_with("text/plain"));
    let body = response.text();
    assert!(body.contains("links_created_total"));
    assert!(body.contains("link_redirects_total"));
}
