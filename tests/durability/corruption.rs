//! Behavior when the document on disk cannot be parsed.

use crate::common::*;

#[test]
fn reset_policy_serves_empty_document_and_overwrites_on_write() {
    let mut t = TestDb::new();
    t.db.append("clients", record(json!({"fullName": "lost"}))).unwrap();
    let path = t.path().to_path_buf();
    let placeholder = Database::ephemeral();
    drop(std::mem::replace(&mut t.db, placeholder));

    std::fs::write(&path, "{ truncated").unwrap();
    t.reopen();

    assert!(t.db.list("clients").unwrap().is_empty());
    assert_eq!(t.contents(), "{ truncated");

    t.db.append("clients", record(json!({"fullName": "new"}))).unwrap();
    let on_disk: Value = serde_json::from_str(&t.contents()).unwrap();
    assert_eq!(on_disk["clients"].as_array().unwrap().len(), 1);
    assert!(on_disk.get("websiteStats").is_some());
}

#[test]
fn fail_policy_reports_corruption_and_keeps_file() {
    let mut t = TestDb::with_policy(CorruptionPolicy::Fail);
    std::fs::write(t.path(), "[1, 2, 3]").unwrap();
    t.reopen();

    assert!(matches!(
        t.db.list("clients"),
        Err(sitedata_core::Error::Corrupt { .. })
    ));
    assert!(t
        .db
        .append("clients", record(json!({"fullName": "x"})))
        .is_err());
    assert_eq!(t.contents(), "[1, 2, 3]");
}

#[test]
fn fail_policy_surfaces_as_internal_error() {
    let mut t = TestDb::with_policy(CorruptionPolicy::Fail);
    std::fs::write(t.path(), "not json").unwrap();
    t.reopen();

    let executor = Executor::new(t.db.clone());
    let err = executor
        .execute(sitedata::Command::List {
            collection: "clients".into(),
        })
        .unwrap_err();
    assert_eq!(err.public_message(), "Internal server error");
}

#[test]
fn missing_file_reads_as_default_even_with_fail_policy() {
    let t = TestDb::with_policy(CorruptionPolicy::Fail);
    std::fs::remove_file(t.path()).unwrap();
    assert!(t.db.list("jobApplications").unwrap().is_empty());
}
