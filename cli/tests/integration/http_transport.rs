//! `HttpTransport` against a local mock server.

#![allow(clippy::expect_used)]

use std::time::Duration;

use flynn_cli::application::ports::{ApiRequest, Service, Transport};
use flynn_cli::domain::{ClientConfig, ClientTuning};
use flynn_cli::infra::transport::HttpTransport;
use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::new(Some("example.com"), Some("admin"), Some("s3cret"), false)
        .expect("config");
    config.endpoints.controller = server.uri();
    config.endpoints.router = format!("{}/router", server.uri());
    config
}

#[tokio::test]
async fn send_uses_basic_auth_and_json_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps"))
        .and(basic_auth("admin", "s3cret"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(serde_json::json!({ "name": "demo" })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"x1","name":"demo"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).expect("transport");
    let req = ApiRequest::post("/apps", &serde_json::json!({ "name": "demo" })).expect("req");
    let resp = transport.send(Service::Controller, req).await.expect("send");

    assert_eq!(resp.status, 200);
    assert!(resp.body.contains("x1"));
}

#[tokio::test]
async fn send_routes_router_requests_and_passes_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/router/routes"))
        .and(query_param("expanded", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).expect("transport");
    let req = ApiRequest::get("/routes").with_query("expanded", "false");
    let resp = transport.send(Service::Router, req).await.expect("send");

    assert_eq!(resp.body, "[]");
}

#[tokio::test]
async fn error_status_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/apps/x1"))
        .respond_with(ResponseTemplate::new(409).set_body_string("app has running jobs"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).expect("transport");
    let resp = transport
        .send(Service::Controller, ApiRequest::delete("/apps/x1"))
        .await
        .expect("send");

    assert_eq!(resp.status, 409);
    assert_eq!(resp.body, "app has running jobs");
    assert!(!resp.is_success());
}

#[tokio::test]
async fn stream_feeds_body_to_sink() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/x1/log"))
        .and(query_param("follow", "true"))
        .and(header("accept", "text/event-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_string("one\ntwo\n"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).expect("transport");
    let mut received = Vec::new();
    let mut sink = |chunk: &[u8]| -> anyhow::Result<()> {
        received.extend_from_slice(chunk);
        Ok(())
    };
    let req = ApiRequest::get("/apps/x1/log").with_query("follow", "true");
    let resp = transport
        .stream(Service::Controller, req, &mut sink)
        .await
        .expect("stream");

    assert!(resp.is_success());
    assert!(resp.body.is_empty());
    assert_eq!(received, b"one\ntwo\n");
}

#[tokio::test]
async fn stream_error_status_buffers_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/x1/log"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).expect("transport");
    let mut calls = 0;
    let mut sink = |_: &[u8]| -> anyhow::Result<()> {
        calls += 1;
        Ok(())
    };
    let resp = transport
        .stream(Service::Controller, ApiRequest::get("/apps/x1/log"), &mut sink)
        .await
        .expect("stream");

    assert_eq!(resp.status, 404);
    assert_eq!(resp.body, "not found");
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn connection_failure_errors_after_retries() {
    let mut config = ClientConfig::new(Some("example.com"), Some("a"), Some("b"), false)
        .expect("config")
        .with_tuning(ClientTuning {
            max_retries: 2,
            ..ClientTuning::default()
        });
    // Nothing listens on port 1.
    config.endpoints.controller = "http://127.0.0.1:1".to_string();

    let transport = HttpTransport::new(&config)
        .expect("transport")
        .with_retry_delay(Duration::from_millis(1));
    let err = transport
        .send(Service::Controller, ApiRequest::get("/apps"))
        .await
        .expect_err("refused");

    assert!(format!("{err:#}").contains("127.0.0.1:1"), "got: {err:#}");
}
