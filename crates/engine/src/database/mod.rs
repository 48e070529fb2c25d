//! Database struct and open logic
//!
//! The [`Database`] owns one [`DocumentStorage`] and runs every collection
//! operation against it:
//!
//! - Reads load the whole document and never block.
//! - Mutations hold the write gate across read, modify and write, so two
//!   requests in the same process cannot lose each other's updates.
//! - Nothing is cached between calls; every call sees the file as it is.
//!
//! Cross-process exclusion comes from the file lock taken by
//! [`JsonFileStorage`].

pub mod config;

pub use config::{SiteDataConfig, CONFIG_FILE_NAME};

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use sitedata_core::{Document, DocumentStorage, Record, Result, Schema};
use sitedata_storage::{JsonFileStorage, MemoryStorage};
use tracing::{debug, info};

use crate::collection;

/// Handle to the document store.
pub struct Database {
    storage: Arc<dyn DocumentStorage>,
    schema: Schema,
    write_gate: Mutex<()>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Open the JSON document named by `config`, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, another process holds the
    /// document, or the default document cannot be written.
    pub fn open(config: &SiteDataConfig) -> Result<Arc<Self>> {
        config.validate()?;
        let schema = config.schema();
        let storage = JsonFileStorage::open(&config.data_file, schema.clone(), config.on_corrupt)?;
        info!(
            target: "sitedata::engine",
            path = ?config.data_file,
            policy = ?config.on_corrupt,
            "Opening document store"
        );
        Self::with_storage(Arc::new(storage), schema).map(Arc::new)
    }

    /// In-memory store with the default schema. Nothing is persisted.
    pub fn ephemeral() -> Arc<Self> {
        Self::ephemeral_with(Schema::default())
    }

    /// In-memory store with a custom schema.
    pub fn ephemeral_with(schema: Schema) -> Arc<Self> {
        let storage = MemoryStorage::new(schema.clone());
        // MemoryStorage::ensure cannot fail
        let _ = storage.ensure();
        Arc::new(Self {
            storage: Arc::new(storage),
            schema,
            write_gate: Mutex::new(()),
        })
    }

    /// Wrap an arbitrary storage backend, ensuring its document exists.
    pub fn with_storage(storage: Arc<dyn DocumentStorage>, schema: Schema) -> Result<Self> {
        storage.ensure()?;
        Ok(Self {
            storage,
            schema,
            write_gate: Mutex::new(()),
        })
    }

    /// Names this store accepts.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The whole root document.
    pub fn document(&self) -> Result<Document> {
        self.storage.read()
    }

    /// Records of `collection`, in insertion order.
    pub fn list(&self, collection: &str) -> Result<Vec<Value>> {
        Ok(collection::list(&self.storage.read()?, collection))
    }

    /// One record by id.
    pub fn get(&self, collection: &str, id: &str) -> Result<Record> {
        collection::find(&self.storage.read()?, collection, id)
    }

    /// Append a record and persist.
    pub fn append(&self, collection: &str, record: Record) -> Result<Record> {
        let record = self.mutate(|doc| collection::append(doc, collection, record))?;
        debug!(target: "sitedata::engine", collection, id = ?record.get("id"), "Appended record");
        Ok(record)
    }

    /// Merge-update a record and persist.
    pub fn update(&self, collection: &str, id: &str, partial: Record) -> Result<Record> {
        let record = self.mutate(|doc| collection::update(doc, collection, id, partial))?;
        debug!(target: "sitedata::engine", collection, id, "Updated record");
        Ok(record)
    }

    /// Remove a record and persist. Returns the removed record.
    pub fn remove(&self, collection: &str, id: &str) -> Result<Record> {
        let record = self.mutate(|doc| collection::remove(doc, collection, id))?;
        debug!(target: "sitedata::engine", collection, id, "Removed record");
        Ok(record)
    }

    /// Content of a singleton.
    pub fn singleton(&self, name: &str) -> Result<Record> {
        Ok(collection::singleton(&self.storage.read()?, name))
    }

    /// Merge into a singleton and persist.
    pub fn merge_singleton(&self, name: &str, partial: Record) -> Result<Record> {
        let object = self.mutate(|doc| collection::merge_singleton(doc, name, partial))?;
        debug!(target: "sitedata::engine", singleton = name, "Merged singleton");
        Ok(object)
    }

    /// One read-modify-write cycle under the write gate.
    ///
    /// Nothing is written when `f` fails.
    fn mutate<T>(&self, f: impl FnOnce(&mut Document) -> Result<T>) -> Result<T> {
        let _guard = self.write_gate.lock();
        let mut document = self.storage.read()?;
        let out = f(&mut document)?;
        self.storage.write(&document)?;
        Ok(out)
    }
}
