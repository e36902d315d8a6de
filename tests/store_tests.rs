//! Key-value facade behavior across backends.

mod support;

use std::sync::Arc;

use quizstore::adapter::outbound::local::{FileStorage, MemoryStorage};
use quizstore::application::store::KeyValueStore;
use quizstore::domain::{BackendMode, CLASSES_KEY, QUESTIONS_KEY};
use quizstore::testkit::MemoryRemote;
use serde_json::json;

use support::Fixture;

#[tokio::test]
async fn remote_writes_are_mirrored_for_offline_reads() {
    let fixture = Fixture::new(MemoryRemote::new());
    assert_eq!(fixture.store.mode(), BackendMode::Remote);

    assert!(fixture.store.set(CLASSES_KEY, &json!(["7A", "7B"])).await);
    assert_eq!(fixture.remote.entry(CLASSES_KEY), Some(json!(["7A", "7B"])));

    // The remote goes away; the mirror still serves the last write.
    fixture.remote.set_failing(true);
    assert_eq!(fixture.store.get(CLASSES_KEY).await, Some(json!(["7A", "7B"])));
    assert_eq!(
        fixture.local_view().get(CLASSES_KEY).await,
        Some(json!(["7A", "7B"]))
    );
}

#[tokio::test]
async fn writes_during_an_outage_land_locally() {
    let fixture = Fixture::new(MemoryRemote::failing());

    assert!(fixture.store.set(QUESTIONS_KEY, &json!([])).await);
    assert_eq!(fixture.local_text(QUESTIONS_KEY).as_deref(), Some("[]"));
    assert_eq!(fixture.remote.entry(QUESTIONS_KEY), None);

    // Once the remote is back, reads go there and miss the offline write.
    fixture.remote.set_failing(false);
    assert_eq!(fixture.store.get(QUESTIONS_KEY).await, None);
    assert!(!fixture.store.exists(QUESTIONS_KEY).await);
}

#[tokio::test]
async fn remove_clears_both_backends() {
    let fixture = Fixture::new(MemoryRemote::new());
    fixture.store.set("k", &json!({"a": 1})).await;

    assert!(fixture.store.remove("k").await);
    assert_eq!(fixture.remote.entry("k"), None);
    assert_eq!(fixture.local_text("k"), None);
    assert!(!fixture.store.exists("k").await);

    // Removing an absent key still succeeds.
    assert!(fixture.store.remove("k").await);
}

#[tokio::test]
async fn null_is_a_value_locally() {
    let store = KeyValueStore::local_only(Arc::new(MemoryStorage::new()));
    assert!(store.set("k", &json!(null)).await);
    assert_eq!(store.get("k").await, Some(json!(null)));
    assert!(store.exists("k").await);
}

#[tokio::test]
async fn values_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let store = KeyValueStore::local_only(Arc::new(FileStorage::open(&path).unwrap()));
        assert!(store.set(CLASSES_KEY, &json!(["9C"])).await);
        assert!(store.set("unicode", &json!("λ ≠ π")).await);
    }

    let store = KeyValueStore::local_only(Arc::new(FileStorage::open(&path).unwrap()));
    assert_eq!(store.get(CLASSES_KEY).await, Some(json!(["9C"])));
    assert_eq!(store.get("unicode").await, Some(json!("λ ≠ π")));
}

#[tokio::test]
async fn quota_exhaustion_reports_false() {
    let store = KeyValueStore::local_only(Arc::new(MemoryStorage::with_quota(32)));
    assert!(store.set("small", &json!(1)).await);
    assert!(!store.set("big", &json!("x".repeat(64))).await);
    assert_eq!(store.get("big").await, None);
    assert_eq!(store.get("small").await, Some(json!(1)));
}

#[tokio::test]
async fn corrupt_local_text_reads_as_absent() {
    let local = Arc::new(MemoryStorage::new());
    quizstore::port::outbound::local::LocalStorage::set_item(local.as_ref(), "k", "{oops")
        .unwrap();

    let store = KeyValueStore::local_only(local);
    assert_eq!(store.get("k").await, None);
    assert!(!store.exists("k").await);
}

#[tokio::test]
async fn typed_helpers_round_trip_catalog_shapes() {
    let store = KeyValueStore::local_only(Arc::new(MemoryStorage::new()));
    assert!(store.set_as(CLASSES_KEY, &["7A".to_string()]).await);
    let classes: Option<Vec<String>> = store.get_as(CLASSES_KEY).await;
    assert_eq!(classes, Some(vec!["7A".to_string()]));

    // A shape mismatch is absent, not a panic.
    let wrong: Option<Vec<u32>> = store.get_as(CLASSES_KEY).await;
    assert_eq!(wrong, None);
}
