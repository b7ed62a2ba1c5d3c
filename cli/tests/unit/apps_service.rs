//! App lifecycle and log services.

#![allow(clippy::expect_used)]

use flynn_cli::application::ports::{Method, Service};
use flynn_cli::application::services::apps;
use flynn_cli::domain::ClientError;

use crate::mocks::{ScriptedTransport, client_error};

#[tokio::test]
async fn create_app_posts_name_and_returns_app() {
    let t = ScriptedTransport::new().on(Method::Post, "/apps", 200, r#"{"id":"x1","name":"demo"}"#);

    let app = apps::create_app(&t, "demo").await.expect("create");

    assert_eq!(app.id, "x1");
    assert_eq!(app.name, "demo");
    let sent = t.sent(Method::Post, "/apps");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, Some(serde_json::json!({ "name": "demo" })));
    assert_eq!(t.requests()[0].0, Service::Controller);
}

#[tokio::test]
async fn create_app_error_carries_response_body() {
    let t = ScriptedTransport::new().on(Method::Post, "/apps", 400, r#"{"message":"name taken"}"#);

    let err = apps::create_app(&t, "demo").await.expect_err("rejected");

    match client_error(&err) {
        ClientError::RemoteCall { status, body, .. } => {
            assert_eq!(*status, 400);
            assert!(body.contains("name taken"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn create_app_with_blank_name_makes_no_request() {
    let t = ScriptedTransport::new();

    let err = apps::create_app(&t, "  ").await.expect_err("blank");

    assert!(client_error(&err).is_precondition());
    assert!(t.requests().is_empty());
}

#[tokio::test]
async fn destroy_app_deletes_by_id() {
    let t = ScriptedTransport::new().on(Method::Delete, "/apps/x1", 200, "");

    apps::destroy_app(&t, "x1").await.expect("destroy");

    assert_eq!(t.sent(Method::Delete, "/apps/x1").len(), 1);
}

#[tokio::test]
async fn list_apps_decodes_every_entry() {
    let t = ScriptedTransport::new().on(
        Method::Get,
        "/apps",
        200,
        r#"[{"id":"a1","name":"one"},{"id":"a2","name":"two","meta":{}}]"#,
    );

    let listed = apps::list_apps(&t).await.expect("list");

    let names: Vec<_> = listed.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["one", "two"]);
}

#[tokio::test]
async fn list_apps_rejects_entries_without_id() {
    let t = ScriptedTransport::new().on(Method::Get, "/apps", 200, r#"[{"name":"one"}]"#);

    let err = apps::list_apps(&t).await.expect_err("malformed");

    assert!(matches!(
        client_error(&err),
        ClientError::MalformedResponse { .. }
    ));
}

#[tokio::test]
async fn get_logs_returns_raw_body() {
    let t = ScriptedTransport::new().on(Method::Get, "/apps/x1/log", 200, "line one\nline two\n");

    let log = apps::get_logs(&t, "x1").await.expect("logs");

    assert_eq!(log, "line one\nline two\n");
}

#[tokio::test]
async fn follow_logs_streams_into_sink_with_follow_query() {
    let t = ScriptedTransport::new().on(Method::Get, "/apps/x1/log", 200, "chunk");
    let mut received = Vec::new();
    let mut sink = |bytes: &[u8]| -> anyhow::Result<()> {
        received.extend_from_slice(bytes);
        Ok(())
    };

    apps::follow_logs(&t, "x1", &mut sink).await.expect("follow");

    assert_eq!(received, b"chunk");
    let sent = t.sent(Method::Get, "/apps/x1/log");
    assert_eq!(sent[0].query, vec![("follow".to_string(), "true".to_string())]);
}

#[tokio::test]
async fn follow_logs_surfaces_error_status() {
    let t = ScriptedTransport::new().on(Method::Get, "/apps/x1/log", 404, "no such app");
    let mut sink = |_: &[u8]| -> anyhow::Result<()> { panic!("sink must not be called") };

    let err = apps::follow_logs(&t, "x1", &mut sink)
        .await
        .expect_err("404");

    match client_error(&err) {
        ClientError::RemoteCall { status, body, .. } => {
            assert_eq!(*status, 404);
            assert_eq!(body, "no such app");
        }
        other => panic!("unexpected error: {other}"),
    }
}
