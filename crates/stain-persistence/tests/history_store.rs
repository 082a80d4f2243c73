#![allow(missing_docs)]

use std::fs;

use chrono::{TimeZone, Utc};
use stain_model::{EstimationResult, HistoryEntry};
use stain_persistence::{
    HistoryStore, PersistenceError, load_history, load_history_async, save_history,
    save_history_async, temp_path_for,
};
use tempfile::tempdir;

fn entry(id: &str, file_name: &str) -> HistoryEntry {
    HistoryEntry {
        id: id.to_string(),
        file_name: file_name.to_string(),
        image_width: 640,
        image_height: 480,
        total_points: 1000,
        points_in_stain: 532,
        estimated_area: 163_430,
        area_percentage: 53.2,
        timestamp: Utc.with_ymd_and_hms(2024, 6, 10, 6, 13, 20).unwrap(),
        image_data_url: "data:image/png;base64,AAAA".to_string(),
    }
}

#[test]
fn test_history_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");

    let mut store = HistoryStore::open(&path);
    store.append(entry("a", "first.png")).unwrap();
    store.append(entry("b", "second.png")).unwrap();

    let reopened = HistoryStore::open(&path);
    let ids: Vec<&str> = reopened.all().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(reopened.all()[0], entry("b", "second.png"));
}

#[test]
fn test_append_remove_clear_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let mut store = HistoryStore::open(&path);

    let e = entry("x", "stain.png");
    store.append(e.clone()).unwrap();
    assert_eq!(store.all()[0], e);

    assert!(store.remove("x").unwrap());
    assert!(store.all().iter().all(|h| h.id != "x"));
    assert!(load_history(&path).unwrap().is_empty());

    store.append(entry("y", "a.png")).unwrap();
    store.append(entry("z", "b.png")).unwrap();
    store.clear().unwrap();
    assert!(store.is_empty());
    assert!(HistoryStore::open(&path).is_empty());
}

#[test]
fn test_corrupted_file_opens_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    fs::write(&path, b"[{\"id\": \"1\", \"fileName\": ").unwrap();

    let mut store = HistoryStore::open(&path);
    assert!(store.is_empty());

    // The next write replaces the corrupted snapshot
    store.append(entry("fresh", "new.png")).unwrap();
    assert_eq!(load_history(&path).unwrap().len(), 1);
}

#[test]
fn test_save_leaves_no_temp_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");

    save_history(&[entry("a", "a.png")], &path).unwrap();
    save_history(&[entry("b", "b.png"), entry("a", "a.png")], &path).unwrap();

    assert!(!temp_path_for(&path).exists());
    assert_eq!(load_history(&path).unwrap().len(), 2);
}

#[test]
fn test_stale_temp_file_does_not_affect_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    save_history(&[entry("a", "a.png")], &path).unwrap();

    // Simulates a crash after the temp file was written but before rename
    fs::write(temp_path_for(&path), b"[{\"broken\"").unwrap();

    let loaded = load_history(&path).unwrap();
    assert_eq!(loaded, vec![entry("a", "a.png")]);
}

#[test]
fn test_write_failure_keeps_memory_state() {
    let dir = tempdir().unwrap();
    // A directory where the file should be makes the rename fail
    let path = dir.path().join("history.json");
    fs::create_dir(&path).unwrap();
    fs::write(path.join("occupied"), b"x").unwrap();

    let mut store = HistoryStore::open(&path);
    let err = store.append(entry("a", "a.png")).unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::AtomicWriteFailed { .. } | PersistenceError::Io { .. }
    ));
    assert_eq!(store.len(), 1);
    assert!(!err.user_message().is_empty());
    assert!(err.suggestion().is_some());
    assert!(!temp_path_for(&path).exists());
}

#[test]
fn test_legacy_snapshot_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    fs::write(
        &path,
        r#"[{"id":"1718000000000","fileName":"old.png","imageWidth":10,"imageHeight":20,
            "totalPoints":1000,"pointsInStain":500,"estimatedArea":100,"areaPercentage":50,
            "timestamp":"2024-06-10T06:13:20.000Z","imageDataUrl":"data:image/png;base64,"}]"#,
    )
    .unwrap();

    let store = HistoryStore::open(&path);
    let old = store.get("1718000000000").unwrap();
    assert_eq!(old.points_string(), "500/1000");
    assert_eq!(old.area_percentage, 50.0);
}

#[tokio::test]
async fn test_async_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");

    save_history_async(vec![entry("a", "a.png")], path.clone())
        .await
        .unwrap();
    let loaded = load_history_async(path.clone()).await.unwrap();
    assert_eq!(loaded, vec![entry("a", "a.png")]);

    let store = HistoryStore::open_async(path).await;
    assert_eq!(store.len(), 1);
}
