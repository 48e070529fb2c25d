//! Persistence across reopen, on-disk format and exclusive access.

use crate::common::*;
use sitedata_core::{DocumentStorage, Error, Schema};
use sitedata_storage::JsonFileStorage;

#[test]
fn open_creates_default_document() {
    let t = TestDb::new();
    let on_disk: Value = serde_json::from_str(&t.contents()).unwrap();

    let keys: Vec<&str> = on_disk
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec![
            "clients",
            "jobApplications",
            "serviceRequests",
            "websiteStats",
            "userAccounts",
            "clientRequests"
        ]
    );
    assert_eq!(on_disk["websiteStats"]["visitors"], json!([]));
}

#[test]
fn records_survive_reopen() {
    let mut t = TestDb::new();
    let stored = t
        .db
        .append("clients", record(json!({"fullName": "Jean Koffi"})))
        .unwrap();
    let id = stored["id"].as_str().unwrap().to_string();
    t.db
        .update("clients", &id, record(json!({"status": "inactive"})))
        .unwrap();

    t.reopen();

    let found = t.db.get("clients", &id).unwrap();
    assert_eq!(found["fullName"], "Jean Koffi");
    assert_eq!(found["status"], "inactive");
}

#[test]
fn file_is_two_space_pretty_json() {
    let t = TestDb::new();
    t.db.append("clients", record(json!({"id": "c1"}))).unwrap();

    let text = t.contents();
    assert!(text.starts_with("{\n  \"clients\": [\n    {\n      \"id\": \"c1\""));
    assert!(!text.ends_with('\n'));
}

#[test]
fn rewrite_of_unchanged_document_is_byte_identical() {
    let t = TestDb::new();
    t.db.append("serviceRequests", record(json!({"service": "logo", "budget": 150})))
        .unwrap();
    t.db.merge_singleton("websiteStats", record(json!({"totalVisits": 9})))
        .unwrap();
    let before = t.contents();
    let path = t.path().to_path_buf();
    drop(t.db);

    let storage = JsonFileStorage::open(&path, Schema::default(), CorruptionPolicy::Reset).unwrap();
    let document = storage.read().unwrap();
    storage.write(&document).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn second_open_is_refused_while_first_is_alive() {
    let t = TestDb::new();
    match Database::open(&t.config) {
        Err(Error::Locked(_)) => {}
        other => panic!("expected Locked, got {other:?}"),
    }
}

#[test]
fn no_temp_file_left_behind() {
    let t = TestDb::new();
    for i in 0..5 {
        t.db.append("userAccounts", record(json!({"n": i}))).unwrap();
    }
    let parent = t.path().parent().unwrap();
    let names: Vec<String> = std::fs::read_dir(parent)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".tmp"))
        .collect();
    assert!(names.is_empty(), "{names:?}");
}
