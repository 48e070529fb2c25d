//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use serde_json::{json, Value};
pub use sitedata::{Database, Executor, SiteDataConfig};
pub use sitedata_core::{CorruptionPolicy, Record};
use tempfile::TempDir;

/// Unwrap a `json!` object literal into a record.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

/// A file-backed database in its own temporary directory.
///
/// The directory outlives reopen cycles; it is removed when the `TestDb`
/// is dropped.
pub struct TestDb {
    pub db: Arc<Database>,
    pub config: SiteDataConfig,
    dir: TempDir,
}

impl TestDb {
    /// Fresh store with the reset policy.
    pub fn new() -> Self {
        Self::with_policy(CorruptionPolicy::Reset)
    }

    /// Fresh store with the given corruption policy.
    pub fn with_policy(on_corrupt: CorruptionPolicy) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config = SiteDataConfig {
            data_file: dir.path().join("data").join("app-data.json"),
            on_corrupt,
            ..Default::default()
        };
        let db = Database::open(&config).expect("open database");
        Self { db, config, dir }
    }

    /// Path of the JSON document.
    pub fn path(&self) -> &Path {
        &self.config.data_file
    }

    /// Raw file content.
    pub fn contents(&self) -> String {
        std::fs::read_to_string(self.path()).expect("read document")
    }

    /// Drop the handle (releasing the file lock) and open the same file again.
    pub fn reopen(&mut self) {
        let placeholder = Database::ephemeral();
        drop(std::mem::replace(&mut self.db, placeholder));
        self.db = Database::open(&self.config).expect("reopen database");
    }

    /// Temporary directory holding the document.
    pub fn dir(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }
}
