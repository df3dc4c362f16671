use std::sync::Arc;
use std::time::Duration;

use matchaway_core::Error;
use matchaway_store::{DocumentStore, LockConfig};
use serde_json::{json, Value};

fn store_in(dir: &tempfile::TempDir) -> DocumentStore {
    DocumentStore::new(dir.path())
}

#[tokio::test]
async fn read_of_missing_collection_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let err = store.read("bookings").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn update_against_fresh_directory_hands_updater_null() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let written = store
        .update("counters", |current: Value| {
            assert!(current.is_null());
            Ok(json!({ "value": 1 }))
        })
        .await
        .unwrap();

    assert_eq!(written["value"], 1);
    assert_eq!(store.read("counters").await.unwrap()["value"], 1);
}

#[tokio::test]
async fn concurrent_updates_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(store_in(&dir));

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .update("counters", |current| {
                        let value = current["value"].as_i64().unwrap_or(0);
                        Ok(json!({ "value": value + 1 }))
                    })
                    .await
                    .unwrap();
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(store.read("counters").await.unwrap()["value"], 20);
}

#[tokio::test]
async fn stuck_writer_causes_lock_timeout_not_a_hang() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::with_lock_config(
        dir.path(),
        LockConfig {
            retry_interval: Duration::from_millis(10),
            max_attempts: 3,
        },
    );

    // Simulate a writer stuck mid-critical-section.
    std::fs::write(dir.path().join("bookings.json.lock"), b"").unwrap();

    let err = store
        .update("bookings", |current| Ok(current))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::LockTimeout(ref c) if c == "bookings"));
}

#[tokio::test]
async fn failed_updater_leaves_snapshot_untouched_and_releases_lock() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store
        .update("faqs", |_| Ok(json!({ "faqs": [], "generation": 1 })))
        .await
        .unwrap();

    let err = store
        .update("faqs", |_| {
            Err(Error::validation("faqs", "updater rejected the merge"))
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    // Committed snapshot survives the aborted transaction.
    assert_eq!(store.read("faqs").await.unwrap()["generation"], 1);
    assert!(!dir.path().join("faqs.json.lock").exists());

    // And the next writer gets straight in.
    store
        .update("faqs", |current| {
            assert_eq!(current["generation"], 1);
            Ok(json!({ "faqs": [], "generation": 2 }))
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn no_temp_file_survives_a_commit() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store
        .update("admins", |_| Ok(json!({ "admins": [] })))
        .await
        .unwrap();

    assert!(dir.path().join("admins.json").exists());
    assert!(!dir.path().join("admins.json.tmp").exists());
    assert!(!dir.path().join("admins.json.lock").exists());
}

#[tokio::test]
async fn interrupted_write_leaves_committed_snapshot_intact() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store
        .update("bookings", |_| Ok(json!({ "bookings": [], "generation": 1 })))
        .await
        .unwrap();
    let committed = std::fs::read(dir.path().join("bookings.json")).unwrap();

    // A writer that died after the temp write but before the rename
    // leaves a stale temp file behind; the committed file is untouched.
    std::fs::write(
        dir.path().join("bookings.json.tmp"),
        b"{ \"bookings\": [ tor",
    )
    .unwrap();

    assert_eq!(store.read("bookings").await.unwrap()["generation"], 1);
    assert_eq!(
        std::fs::read(dir.path().join("bookings.json")).unwrap(),
        committed
    );

    // The next transaction commits cleanly over the debris.
    store
        .update("bookings", |current| {
            assert_eq!(current["generation"], 1);
            Ok(json!({ "bookings": [], "generation": 2 }))
        })
        .await
        .unwrap();
    assert_eq!(store.read("bookings").await.unwrap()["generation"], 2);
    assert!(!dir.path().join("bookings.json.tmp").exists());
}

#[tokio::test]
async fn collections_lock_independently() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::with_lock_config(
        dir.path(),
        LockConfig {
            retry_interval: Duration::from_millis(10),
            max_attempts: 3,
        },
    );

    // A stuck writer on one collection must not block another.
    std::fs::write(dir.path().join("bookings.json.lock"), b"").unwrap();

    store
        .update("faqs", |_| Ok(json!({ "faqs": [] })))
        .await
        .unwrap();
}
