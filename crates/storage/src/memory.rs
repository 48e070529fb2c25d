//! Ephemeral in-memory backend
//!
//! Holds the document in process memory. Nothing survives a restart.
//! Writes can be switched off to exercise failure paths.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use sitedata_core::{Document, DocumentStorage, Error, Result, Schema};

/// Document kept in memory.
#[derive(Debug)]
pub struct MemoryStorage {
    schema: Schema,
    document: RwLock<Option<Document>>,
    reject_writes: AtomicBool,
}

impl MemoryStorage {
    /// Empty storage; `ensure` installs the default document.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            document: RwLock::new(None),
            reject_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent write fail with a permission error.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(Schema::default())
    }
}

impl DocumentStorage for MemoryStorage {
    fn ensure(&self) -> Result<()> {
        let mut document = self.document.write();
        if document.is_none() {
            *document = Some(self.schema.empty_document());
        }
        Ok(())
    }

    fn read(&self) -> Result<Document> {
        Ok(self
            .document
            .read()
            .clone()
            .unwrap_or_else(|| self.schema.empty_document()))
    }

    fn write(&self, document: &Document) -> Result<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "writes rejected",
            )));
        }
        *self.document.write() = Some(document.clone());
        Ok(())
    }
}
