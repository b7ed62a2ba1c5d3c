//! The `flynn` binary against a mock controller, configured through a
//! settings file.

#![allow(clippy::expect_used)]

use std::path::Path;
use std::process::Output;

use tempfile::TempDir;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::cli_tests::flynn;

fn write_settings(dir: &Path, server: &MockServer) -> std::path::PathBuf {
    let file = dir.join("config.yaml");
    let yaml = format!(
        "host: example.com\nusername: admin\npassword: s3cret\ncontroller_url: {uri}/\nrouter_url: {uri}\nmax_retries: 0\n",
        uri = server.uri()
    );
    std::fs::write(&file, yaml).expect("write settings");
    file
}

async fn run(config: std::path::PathBuf, args: &'static [&'static str]) -> Output {
    tokio::task::spawn_blocking(move || {
        flynn()
            .env("FLYNN_CONFIG", config)
            .args(args)
            .output()
            .expect("run flynn")
    })
    .await
    .expect("join")
}

#[tokio::test(flavor = "multi_thread")]
async fn apps_list_reads_settings_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps"))
        .and(basic_auth("admin", "s3cret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"[{"id":"a1","name":"demo"}]"#),
        )
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().expect("tempdir");
    let config = write_settings(dir.path(), &server);

    let out = run(config, &["--json", "apps", "list"]).await;

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(v[0]["id"], "a1");
    assert_eq!(v[0]["name"], "demo");
}

#[tokio::test(flavor = "multi_thread")]
async fn flags_override_settings_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps"))
        .and(basic_auth("ops", "other"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().expect("tempdir");
    let config = write_settings(dir.path(), &server);

    let out = run(
        config,
        &["--username", "ops", "--password", "other", "--json", "apps", "list"],
    )
    .await;

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_failure_json_error_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps"))
        .respond_with(ResponseTemplate::new(400).set_body_string("name already taken"))
        .mount(&server)
        .await;
    let dir = TempDir::new().expect("tempdir");
    let config = write_settings(dir.path(), &server);

    let out = run(config, &["--json", "apps", "create", "demo"]).await;

    assert!(!out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(v["code"], "REMOTE_CALL_FAILED");
    assert!(
        v["message"]
            .as_str()
            .is_some_and(|m| m.contains("name already taken"))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn config_get_prints_current_env() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/a1/release"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"id":"r1","env":{"PORT":"8080"}}"#),
        )
        .mount(&server)
        .await;
    let dir = TempDir::new().expect("tempdir");
    let config = write_settings(dir.path(), &server);

    let out = run(config, &["--json", "config", "get", "a1"]).await;

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(v, serde_json::json!({ "PORT": "8080" }));
}
