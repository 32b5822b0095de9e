//! Action dispatcher tests
//!
//! Time is paused so the settle delay elapses only when the runtime idles.

use std::sync::Arc;
use std::time::Duration;

use console_api::MicroserviceStatus;
use msconsole::cache::microservices::MicroserviceCache;
use msconsole::dispatch::action::ActionKind;
use msconsole::dispatch::dispatcher::{ActionDispatcher, DispatcherOptions};
use msconsole::errors::ConsoleError;
use tokio_test::assert_ok;

use crate::support::{microservice, FakeBackend};

async fn setup(
    microservices: Vec<console_api::Microservice>,
) -> (Arc<FakeBackend>, Arc<MicroserviceCache>, ActionDispatcher) {
    let backend = Arc::new(FakeBackend::with(microservices));
    let cache = Arc::new(MicroserviceCache::new(backend.clone()));
    cache.list().await.unwrap();
    let dispatcher =
        ActionDispatcher::new(backend.clone(), cache.clone(), DispatcherOptions::default());
    (backend, cache, dispatcher)
}

#[tokio::test(start_paused = true)]
async fn test_busy_until_settled_and_refetched() {
    let (backend, cache, dispatcher) =
        setup(vec![microservice("sum", MicroserviceStatus::Running, false)]).await;

    let ticket = dispatcher.dispatch("sum", ActionKind::Stop).await.unwrap();
    assert!(ticket.ack.ok);
    assert!(dispatcher.busy().is_busy("sum"));

    // Still waiting just before the delay runs out
    tokio::time::sleep(Duration::from_millis(1400)).await;
    assert!(dispatcher.busy().is_busy("sum"));
    assert_eq!(backend.list_calls(), 1);
    assert_eq!(cache.get("sum").unwrap().status, MicroserviceStatus::Running);

    ticket.settled().await;
    assert!(!dispatcher.busy().is_busy("sum"));
    assert_eq!(backend.list_calls(), 2);
    assert_eq!(cache.get("sum").unwrap().status, MicroserviceStatus::Stopped);
    assert_eq!(dispatcher.pending_reconciliations(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_dispatch_same_id() {
    let (backend, _cache, dispatcher) =
        setup(vec![microservice("sum", MicroserviceStatus::Running, false)]).await;

    let (first, second) = tokio::join!(
        dispatcher.dispatch("sum", ActionKind::Stop),
        dispatcher.dispatch("sum", ActionKind::Delete),
    );
    let (ticket, err) = match (first, second) {
        (Ok(ticket), Err(err)) | (Err(err), Ok(ticket)) => (ticket, err),
        (first, second) => panic!(
            "expected exactly one dispatch to win: {:?} / {:?}",
            first.is_ok(),
            second.is_ok()
        ),
    };
    assert!(matches!(err, ConsoleError::Busy(ref id) if id == "sum"));
    assert_eq!(backend.actions().len(), 1);
    assert!(dispatcher.busy().is_busy("sum"));

    ticket.settled().await;
    assert!(!dispatcher.busy().is_busy("sum"));
}

#[tokio::test(start_paused = true)]
async fn test_busy_id_rejected_without_request() {
    let (backend, _cache, dispatcher) =
        setup(vec![microservice("sum", MicroserviceStatus::Running, false)]).await;

    let ticket = dispatcher.dispatch("sum", ActionKind::Restart).await.unwrap();
    let err = dispatcher
        .dispatch("sum", ActionKind::Stop)
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Busy(ref id) if id == "sum"));
    assert_eq!(backend.actions().len(), 1);

    ticket.settled().await;
    assert_ok!(dispatcher.dispatch("sum", ActionKind::Stop).await);
    assert_eq!(backend.actions().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_failure_releases_immediately() {
    let (backend, _cache, dispatcher) =
        setup(vec![microservice("sum", MicroserviceStatus::Running, false)]).await;
    backend.set_fail_actions(Some("container not found"));

    let err = dispatcher
        .dispatch("sum", ActionKind::Restart)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "container not found");
    assert!(!dispatcher.busy().is_busy("sum"));
    assert_eq!(dispatcher.pending_reconciliations(), 0);

    // No reconciliation was scheduled
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(backend.list_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unavailable_action_sends_nothing() {
    let (backend, _cache, dispatcher) =
        setup(vec![microservice("sum", MicroserviceStatus::Exited, false)]).await;

    let err = dispatcher.dispatch("sum", ActionKind::Stop).await.unwrap_err();
    assert!(matches!(err, ConsoleError::ActionUnavailable { .. }));
    assert!(err.is_local());
    assert!(backend.actions().is_empty());
    assert!(!dispatcher.busy().is_busy("sum"));

    let err = dispatcher
        .dispatch("ghost", ActionKind::Delete)
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::NotFound(_)));
    assert!(backend.actions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_ids_are_independent() {
    let (backend, cache, dispatcher) = setup(vec![
        microservice("a", MicroserviceStatus::Running, false),
        microservice("b", MicroserviceStatus::Stopped, false),
    ])
    .await;

    let first = dispatcher.dispatch("a", ActionKind::Stop).await.unwrap();
    let second = dispatcher.dispatch("b", ActionKind::Delete).await.unwrap();
    assert_eq!(dispatcher.busy().ids(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(dispatcher.pending_reconciliations(), 2);

    first.settled().await;
    second.settled().await;
    assert!(dispatcher.busy().is_empty());
    assert!(cache.get("b").is_none());
    assert_eq!(backend.actions().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_failed_refetch_still_clears_busy() {
    let (backend, cache, dispatcher) =
        setup(vec![microservice("sum", MicroserviceStatus::Running, false)]).await;

    let ticket = dispatcher.dispatch("sum", ActionKind::Stop).await.unwrap();
    backend.set_fail_list(true);
    ticket.settled().await;

    assert!(!dispatcher.busy().is_busy("sum"));
    assert_eq!(cache.get("sum").unwrap().status, MicroserviceStatus::Running);
    assert!(cache.last_error().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_aborts_reconciliation() {
    let (backend, _cache, dispatcher) =
        setup(vec![microservice("sum", MicroserviceStatus::Running, false)]).await;

    let ticket = dispatcher.dispatch("sum", ActionKind::Restart).await.unwrap();
    dispatcher.shutdown();
    ticket.settled().await;

    assert!(!dispatcher.busy().is_busy("sum"));
    assert_eq!(backend.list_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_custom_settle_delay() {
    let backend = Arc::new(FakeBackend::with(vec![microservice(
        "sum",
        MicroserviceStatus::Running,
        false,
    )]));
    let cache = Arc::new(MicroserviceCache::new(backend.clone()));
    cache.list().await.unwrap();
    let dispatcher = ActionDispatcher::new(
        backend.clone(),
        cache,
        DispatcherOptions {
            settle_delay: Duration::from_millis(100),
        },
    );

    let _ticket = dispatcher.dispatch("sum", ActionKind::Stop).await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(!dispatcher.busy().is_busy("sum"));
    assert_eq!(backend.list_calls(), 2);
}
