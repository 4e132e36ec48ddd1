//! Integration tests for status synchronization against a mock backend:
//! - Reconciliation ordering after toggles (accept and reject paths)
//! - Idempotent classification reset
//! - Failure semantics: retained cache, stale marking on malformed bodies

mod support;

use newsdeck::{BackendClient, Freshness, StatusSync};
use support::{BackendState, MockBackend};

fn sync_for(backend: &MockBackend) -> StatusSync {
    StatusSync::new(BackendClient::new(backend.url()).unwrap())
}

#[tokio::test]
async fn test_toggle_reconciles_with_backend_truth() {
    let backend = MockBackend::spawn().await;
    let sync = sync_for(&backend);

    sync.refresh().await;
    let snapshot = sync.snapshot().await;
    assert!(!snapshot.status.is_polling);
    assert_eq!(snapshot.freshness, Freshness::Live);

    sync.set_polling(true).await;
    let snapshot = sync.snapshot().await;
    assert!(snapshot.status.is_polling);
    assert!(!snapshot.status.is_classifying);
    assert!(snapshot.last_error.is_none());

    sync.set_polling(false).await;
    assert!(!sync.snapshot().await.status.is_polling);
}

#[tokio::test]
async fn test_flags_are_independent() {
    let backend = MockBackend::spawn().await;
    let sync = sync_for(&backend);

    sync.set_classifying(true).await;
    let snapshot = sync.snapshot().await;
    assert!(!snapshot.status.is_polling);
    assert!(snapshot.status.is_classifying);
}

#[tokio::test]
async fn test_rejected_toggle_leaves_cache_untouched() {
    let backend = MockBackend::spawn().await;
    let sync = sync_for(&backend);

    sync.refresh().await;
    backend.mutate(|s| s.reject_mutations = true);

    sync.set_polling(true).await;
    let snapshot = sync.snapshot().await;
    assert!(!snapshot.status.is_polling, "rejected action must not flip the toggle");
    assert!(snapshot.last_error.is_some());
    assert!(!backend.state().is_polling);
}

#[tokio::test]
async fn test_reset_is_idempotent() {
    let backend = MockBackend::spawn_with(BackendState {
        classified: 7,
        unclassified: 3,
        ..BackendState::default()
    })
    .await;
    let sync = sync_for(&backend);

    sync.reset_classifications().await;
    let after_one = (backend.state().classified, backend.state().unclassified);
    let status_after_one = sync.snapshot().await.status;

    sync.reset_classifications().await;
    let after_two = (backend.state().classified, backend.state().unclassified);
    let status_after_two = sync.snapshot().await.status;

    assert_eq!(after_one, (0, 10));
    assert_eq!(after_one, after_two);
    assert_eq!(status_after_one, status_after_two);
}

#[tokio::test]
async fn test_transport_failure_retains_last_known_status() {
    let backend = MockBackend::spawn_with(BackendState {
        is_polling: true,
        ..BackendState::default()
    })
    .await;
    let sync = sync_for(&backend);

    sync.refresh().await;
    assert_eq!(sync.snapshot().await.freshness, Freshness::Live);

    backend.shutdown();
    sync.refresh().await;

    let snapshot = sync.snapshot().await;
    assert!(snapshot.status.is_polling, "last known flags survive the outage");
    assert_eq!(snapshot.freshness, Freshness::Stale);
    assert!(snapshot.last_error.is_some());
}

#[tokio::test]
async fn test_malformed_body_marks_stale_without_partial_data() {
    let backend = MockBackend::spawn_with(BackendState {
        is_polling: true,
        is_classifying: true,
        ..BackendState::default()
    })
    .await;
    let sync = sync_for(&backend);

    sync.refresh().await;
    backend.mutate(|s| s.malformed_status = true);
    sync.refresh().await;

    let snapshot = sync.snapshot().await;
    assert!(snapshot.status.is_polling);
    assert!(snapshot.status.is_classifying);
    assert_eq!(snapshot.freshness, Freshness::Stale);
}

#[tokio::test]
async fn test_concurrent_mutations_serialize() {
    let backend = MockBackend::spawn().await;
    let sync = std::sync::Arc::new(sync_for(&backend));

    let a = {
        let sync = sync.clone();
        tokio::spawn(async move { sync.set_polling(true).await })
    };
    let b = {
        let sync = sync.clone();
        tokio::spawn(async move { sync.set_classifying(true).await })
    };
    a.await.unwrap();
    b.await.unwrap();

    // Whichever mutation ran second reconciled after both were applied
    let snapshot = sync.snapshot().await;
    assert!(snapshot.status.is_polling);
    assert!(snapshot.status.is_classifying);
    assert_eq!(snapshot.freshness, Freshness::Live);
}
