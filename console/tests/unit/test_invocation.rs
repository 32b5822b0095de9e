//! Test panel tests

use std::sync::Arc;

use console_api::MicroserviceStatus;
use msconsole::cache::microservices::MicroserviceCache;
use msconsole::errors::ConsoleError;
use msconsole::invoke::panel::TestPanel;
use msconsole::invoke::request::{INVALID_PAYLOAD, MISSING_PROJECT};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::support::{microservice, FakeBackend};

async fn setup() -> (Arc<FakeBackend>, MicroserviceCache) {
    let backend = Arc::new(FakeBackend::with(vec![
        microservice("sum_service", MicroserviceStatus::Running, false),
        microservice("login", MicroserviceStatus::Running, true),
        microservice("idle", MicroserviceStatus::Stopped, false),
    ]));
    let cache = MicroserviceCache::new(backend.clone());
    cache.list().await.unwrap();
    (backend, cache)
}

#[tokio::test]
async fn test_sum_scenario() {
    let (backend, cache) = setup().await;
    backend.set_invoke_response(200, r#"{"result": 3}"#);

    let mut panel = TestPanel::new();
    panel.select("sum_service");
    assert!(!panel.shows_roble_fields(&cache));
    panel.set_payload(r#"{"a": 1, "b": 2}"#);

    let report = panel.submit(&cache, backend.as_ref()).await.unwrap();
    assert!(report.is_success());
    assert_eq!(report.status, Some(200));
    assert!(report.body.contains("\"result\": 3"));
    assert!(panel.last_report().is_some());

    let sent = backend.invocations();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].endpoint.as_str(), "http://localhost:8000/sum_service");
    assert!(sent[0].authorization.is_none());
    assert_eq!(
        serde_json::to_value(&sent[0].envelope).unwrap(),
        json!({"project_id": "", "payload": {"a": 1, "b": 2}})
    );
}

#[tokio::test]
async fn test_invalid_payload_sends_nothing() {
    let (backend, cache) = setup().await;

    let mut panel = TestPanel::new();
    panel.select("sum_service");
    panel.set_payload("{a: 1}");

    let err = panel.submit(&cache, backend.as_ref()).await.unwrap_err();
    assert_eq!(err.to_string(), INVALID_PAYLOAD);
    assert!(backend.invocations().is_empty());
}

#[tokio::test]
async fn test_roble_needs_project_and_sends_bearer() {
    let (backend, cache) = setup().await;

    let mut panel = TestPanel::new();
    panel.select("login");
    assert!(panel.shows_roble_fields(&cache));
    panel.set_payload("{}");
    panel.set_token(Some(SecretString::from("abc123")));

    let err = panel.submit(&cache, backend.as_ref()).await.unwrap_err();
    assert_eq!(err.to_string(), MISSING_PROJECT);
    assert!(backend.invocations().is_empty());

    panel.set_project_id("pc2_32edb2e47f");
    panel.submit(&cache, backend.as_ref()).await.unwrap();

    let sent = backend.invocations();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].authorization.as_ref().unwrap().expose_secret(),
        "Bearer abc123"
    );
    assert_eq!(sent[0].envelope.project_id, "pc2_32edb2e47f");
    assert_eq!(sent[0].envelope.payload, json!({}));
}

#[tokio::test]
async fn test_stopped_target_rejected() {
    let (backend, cache) = setup().await;

    let mut panel = TestPanel::new();
    assert_eq!(panel.selectable(&cache).len(), 2);
    panel.select("idle");

    let err = panel.submit(&cache, backend.as_ref()).await.unwrap_err();
    assert!(matches!(err, ConsoleError::NotRunning(_)));
    assert!(backend.invocations().is_empty());
}

#[tokio::test]
async fn test_error_status_reported_not_raised() {
    let (backend, cache) = setup().await;
    backend.set_invoke_response(400, r#"{"ok": false, "error": "missing field a"}"#);

    let mut panel = TestPanel::new();
    panel.select("sum_service");
    panel.set_payload(r#"{"b": 2}"#);

    let report = panel.submit(&cache, backend.as_ref()).await.unwrap();
    assert!(!report.is_success());
    assert_eq!(report.status, Some(400));
    assert_eq!(
        report.notification.description.as_deref(),
        Some("missing field a")
    );
}

#[tokio::test]
async fn test_error_status_without_message() {
    let (backend, cache) = setup().await;
    backend.set_invoke_response(502, "Bad Gateway");

    let mut panel = TestPanel::new();
    panel.select("sum_service");

    let report = panel.submit(&cache, backend.as_ref()).await.unwrap();
    assert_eq!(report.body, "Bad Gateway");
    assert_eq!(report.notification.description.as_deref(), Some("Status: 502"));
}
