//! Release rotation (`get_config` / `set_config`) and formation cleanup.

#![allow(clippy::expect_used)]

use std::collections::BTreeMap;

use flynn_cli::application::ports::Method;
use flynn_cli::application::services::release;

use crate::mocks::{ScriptedTransport, client_error};

fn patch(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[tokio::test]
async fn set_config_on_app_without_release_creates_first_release() {
    let t = ScriptedTransport::new()
        .on(Method::Get, "/apps/a1/release", 404, "")
        .on(Method::Post, "/releases", 200, r#"{"id":"r1","env":{"FOO":"bar"}}"#)
        .on(Method::Put, "/apps/a1/release", 200, "")
        .on(Method::Get, "/apps/a1/formations", 200, "[]");

    let change = release::set_config(&t, "a1", &patch(&[("FOO", "bar")]))
        .await
        .expect("set");

    assert_eq!(change.release_id, "r1");
    assert!(change.cleanup.is_clean());
    let created = t.sent(Method::Post, "/releases");
    assert_eq!(
        created[0].body,
        Some(serde_json::json!({ "env": { "FOO": "bar" } }))
    );
    let pointer = t.sent(Method::Put, "/apps/a1/release");
    assert_eq!(pointer[0].body, Some(serde_json::json!({ "id": "r1" })));
}

#[tokio::test]
async fn set_config_merges_patch_and_keeps_release_fields() {
    let t = ScriptedTransport::new()
        .on(
            Method::Get,
            "/apps/a1/release",
            200,
            r#"{"id":"r1","artifact":"img-1","env":{"A":"1","B":"2"}}"#,
        )
        .on(Method::Post, "/releases", 201, r#"{"id":"r2"}"#)
        .on(Method::Put, "/apps/a1/release", 200, "")
        .on(Method::Get, "/apps/a1/formations", 200, "[]");

    release::set_config(&t, "a1", &patch(&[("B", "3"), ("C", "4")]))
        .await
        .expect("set");

    let body = t.sent(Method::Post, "/releases")[0]
        .body
        .clone()
        .expect("body");
    assert_eq!(body["env"], serde_json::json!({ "A": "1", "B": "3", "C": "4" }));
    assert_eq!(body["artifact"], "img-1");
    assert!(body.get("id").is_none(), "new release must not reuse the old id");
}

#[tokio::test]
async fn set_config_deletes_formations_of_older_releases() {
    let t = ScriptedTransport::new()
        .on(Method::Get, "/apps/a1/release", 200, r#"{"id":"r1","env":{}}"#)
        .on(Method::Post, "/releases", 200, r#"{"id":"r3"}"#)
        .on(Method::Put, "/apps/a1/release", 200, "")
        .on(
            Method::Get,
            "/apps/a1/formations",
            200,
            r#"[{"release":"r1","processes":{"web":1}},{"release":"r2","processes":{}},{"release":"r3","processes":{"web":1}}]"#,
        )
        .on(Method::Delete, "/apps/a1/formations/r1", 200, "")
        .on(Method::Delete, "/apps/a1/formations/r2", 500, "boom");

    let change = release::set_config(&t, "a1", &patch(&[("X", "y")]))
        .await
        .expect("cleanup failures do not fail the change");

    assert_eq!(change.release_id, "r3");
    assert_eq!(change.cleanup.deleted, ["r1"]);
    assert_eq!(change.cleanup.failed.len(), 1);
    assert_eq!(change.cleanup.failed[0].0, "r2");
    assert!(t.sent(Method::Delete, "/apps/a1/formations/r3").is_empty());
}

#[tokio::test]
async fn set_config_keeps_only_formation_until_new_release_has_one() {
    let t = ScriptedTransport::new()
        .on(Method::Get, "/apps/a1/release", 200, r#"{"id":"r1","env":{}}"#)
        .on(Method::Post, "/releases", 200, r#"{"id":"r3"}"#)
        .on(Method::Put, "/apps/a1/release", 200, "")
        .on(
            Method::Get,
            "/apps/a1/formations",
            200,
            r#"[{"release":"r1","processes":{"web":2}}]"#,
        );

    let change = release::set_config(&t, "a1", &patch(&[("X", "y")]))
        .await
        .expect("deferral does not fail the change");

    assert_eq!(change.release_id, "r3");
    assert!(change.cleanup.deleted.is_empty());
    assert!(change.cleanup.deferred.is_some());
    assert!(!change.cleanup.is_clean());
    assert_eq!(t.count(Method::Delete), 0);
}

#[tokio::test]
async fn set_config_stops_before_pointer_when_release_creation_fails() {
    let t = ScriptedTransport::new()
        .on(Method::Get, "/apps/a1/release", 404, "")
        .on(Method::Post, "/releases", 422, r#"{"message":"invalid env"}"#);

    let err = release::set_config(&t, "a1", &patch(&[("K", "v")]))
        .await
        .expect_err("create fails");

    assert!(format!("{err}").contains("invalid env"));
    assert!(t.sent(Method::Put, "/apps/a1/release").is_empty());
    assert_eq!(t.count(Method::Delete), 0);
}

#[tokio::test]
async fn set_config_rejects_created_release_without_id() {
    let t = ScriptedTransport::new()
        .on(Method::Get, "/apps/a1/release", 404, "")
        .on(Method::Post, "/releases", 200, r#"{"env":{}}"#);

    let err = release::set_config(&t, "a1", &patch(&[("K", "v")]))
        .await
        .expect_err("no id");

    assert_eq!(client_error(&err).code(), "MALFORMED_RESPONSE");
}

#[tokio::test]
async fn cleanup_records_listing_failure() {
    let t = ScriptedTransport::new().on(Method::Get, "/apps/a1/formations", 503, "");

    let report = release::delete_old_formations(&t, "a1", "r9").await;

    assert!(report.listing_error.is_some());
    assert!(report.deleted.is_empty());
    assert!(!report.is_clean());
}

#[tokio::test]
async fn get_config_returns_current_env_or_empty() {
    let t = ScriptedTransport::new().on(
        Method::Get,
        "/apps/a1/release",
        200,
        r#"{"id":"r1","env":{"PORT":"8080"}}"#,
    );
    let env = release::get_config(&t, "a1").await.expect("get");
    assert_eq!(env, patch(&[("PORT", "8080")]));

    let empty = ScriptedTransport::new().on(Method::Get, "/apps/a2/release", 200, "");
    assert!(release::get_config(&empty, "a2").await.expect("get").is_empty());
}
