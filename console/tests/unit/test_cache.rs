//! Cache unit tests

use std::sync::Arc;

use console_api::MicroserviceStatus;
use msconsole::cache::microservices::MicroserviceCache;
use tokio_test::{assert_err, assert_ok};

use crate::support::{microservice, FakeBackend};

#[tokio::test]
async fn test_list_replaces_wholesale() {
    let backend = Arc::new(FakeBackend::with(vec![
        microservice("sum", MicroserviceStatus::Running, false),
        microservice("login", MicroserviceStatus::Stopped, true),
    ]));
    let cache = MicroserviceCache::new(backend.clone());
    assert!(cache.is_empty());

    let listed = cache.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(cache.generation(), 1);
    assert_eq!(cache.get("login").unwrap().status, MicroserviceStatus::Stopped);
    assert!(cache.get("missing").is_none());
}

#[tokio::test]
async fn test_failed_list_keeps_previous() {
    let backend = Arc::new(FakeBackend::with(vec![microservice(
        "sum",
        MicroserviceStatus::Running,
        false,
    )]));
    let cache = MicroserviceCache::new(backend.clone());
    cache.list().await.unwrap();

    backend.set_fail_list(true);
    assert_err!(cache.list().await);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.generation(), 1);
    assert_eq!(cache.last_error().as_deref(), Some("Status: 500"));

    backend.set_fail_list(false);
    assert_ok!(cache.list().await);
    assert!(cache.last_error().is_none());
    assert_eq!(backend.list_calls(), 3);
}

#[tokio::test]
async fn test_running_only_offers_running() {
    let backend = Arc::new(FakeBackend::with(vec![
        microservice("a", MicroserviceStatus::Running, false),
        microservice("b", MicroserviceStatus::Exited, false),
        microservice("c", MicroserviceStatus::Error, false),
        microservice("d", MicroserviceStatus::Running, true),
    ]));
    let cache = MicroserviceCache::new(backend);
    cache.list().await.unwrap();

    let ids: Vec<String> = cache.running().into_iter().map(|ms| ms.id).collect();
    assert_eq!(ids, vec!["a".to_string(), "d".to_string()]);
}

#[tokio::test]
async fn test_fetch_code_leaves_list_alone() {
    let backend = Arc::new(FakeBackend::with(vec![]));
    backend.add_code("sum", "print('hi')", false);
    let cache = MicroserviceCache::new(backend.clone());

    let code = cache.fetch_code("sum").await.unwrap();
    assert_eq!(code.code, "print('hi')");
    assert!(!code.is_roble);
    assert_eq!(cache.generation(), 0);
    assert_eq!(backend.list_calls(), 0);
}
