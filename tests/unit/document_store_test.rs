//! Unit tests for the DocumentStore: whole-key reads/writes, persistence,
//! and the change-notification stream.

use quickmarks::store::DocumentStore;
use serde_json::json;

#[test]
fn test_get_absent_key_returns_none() {
    let store = DocumentStore::open_in_memory().unwrap();
    assert!(store.get("categories").unwrap().is_none());
}

#[test]
fn test_set_then_get_roundtrip() {
    let store = DocumentStore::open_in_memory().unwrap();
    let value = json!([{"id": "new", "name": "New", "isDefault": true}]);
    store.set("categories", value.clone()).unwrap();
    assert_eq!(store.get("categories").unwrap(), Some(value));
}

#[test]
fn test_set_replaces_whole_value_last_write_wins() {
    let store = DocumentStore::open_in_memory().unwrap();
    store.set("bookmarks", json!(["first"])).unwrap();
    store.set("bookmarks", json!(["second"])).unwrap();
    assert_eq!(store.get("bookmarks").unwrap(), Some(json!(["second"])));
}

#[test]
fn test_remove_deletes_key() {
    let store = DocumentStore::open_in_memory().unwrap();
    store.set("viewMode", json!("grid")).unwrap();
    store.remove("viewMode").unwrap();
    assert!(store.get("viewMode").unwrap().is_none());
}

#[test]
fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    {
        let store = DocumentStore::open(&path).unwrap();
        store.set("darkMode", json!(true)).unwrap();
    }

    let store = DocumentStore::open(&path).unwrap();
    assert_eq!(store.get("darkMode").unwrap(), Some(json!(true)));
}

#[tokio::test]
async fn test_subscriber_receives_change_with_old_and_new_value() {
    let store = DocumentStore::open_in_memory().unwrap();
    store.set("bookmarks", json!(["old"])).unwrap();

    let mut rx = store.subscribe();
    store.set("bookmarks", json!(["new"])).unwrap();

    let change = rx.recv().await.unwrap();
    assert_eq!(change.key, "bookmarks");
    assert_eq!(change.old_value, Some(json!(["old"])));
    assert_eq!(change.new_value, Some(json!(["new"])));
}

#[tokio::test]
async fn test_every_subscriber_gets_every_change_in_commit_order() {
    let store = DocumentStore::open_in_memory().unwrap();
    let mut rx_a = store.subscribe();
    let mut rx_b = store.subscribe();

    store.set("categories", json!([1])).unwrap();
    store.set("bookmarks", json!([2])).unwrap();

    for rx in [&mut rx_a, &mut rx_b] {
        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.key, "categories");
        assert_eq!(second.key, "bookmarks");
    }
}

#[tokio::test]
async fn test_remove_emits_change_with_none_new_value() {
    let store = DocumentStore::open_in_memory().unwrap();
    store.set("viewMode", json!("list")).unwrap();

    let mut rx = store.subscribe();
    store.remove("viewMode").unwrap();

    let change = rx.recv().await.unwrap();
    assert_eq!(change.key, "viewMode");
    assert_eq!(change.old_value, Some(json!("list")));
    assert_eq!(change.new_value, None);
}

#[tokio::test]
async fn test_remove_of_absent_key_emits_nothing() {
    let store = DocumentStore::open_in_memory().unwrap();
    let mut rx = store.subscribe();
    store.remove("never-set").unwrap();

    // a subsequent write must be the first thing the subscriber sees
    store.set("categories", json!([])).unwrap();
    let change = rx.recv().await.unwrap();
    assert_eq!(change.key, "categories");
}

#[tokio::test]
async fn test_concurrent_writers_notify_in_commit_order() {
    let store = std::sync::Arc::new(DocumentStore::open_in_memory().unwrap());
    let mut rx = store.subscribe();

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let store = std::sync::Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..8 {
                    store.set("counter", json!(w * 100 + i)).unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    // each change's old value must be the previous change's new value, and
    // the last notification must match what the store actually holds
    let mut previous = None;
    let mut last = None;
    while let Ok(change) = rx.try_recv() {
        assert_eq!(change.old_value, previous);
        previous = change.new_value.clone();
        last = change.new_value;
    }
    assert_eq!(store.get("counter").unwrap(), last);
}

#[test]
fn test_set_without_subscribers_is_fine() {
    let store = DocumentStore::open_in_memory().unwrap();
    store.set("bookmarks", json!([])).unwrap();
}
