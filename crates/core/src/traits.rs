//! Storage abstraction for the root document
//!
//! This module defines the [`DocumentStorage`] trait that lets the engine
//! swap a JSON file for an in-memory buffer (or a real embedded database)
//! without touching upper layers.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::Result;

/// What a store does when the backing file cannot be read or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptionPolicy {
    /// Log a warning and serve the default document. The next write
    /// replaces the unreadable file.
    #[default]
    Reset,
    /// Surface the failure to the caller.
    Fail,
}

/// Durable home of exactly one [`Document`].
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). Implementations do not
/// serialize read-modify-write cycles; that is the engine's job.
pub trait DocumentStorage: Send + Sync {
    /// Make sure a document exists, writing the default one if not.
    ///
    /// Idempotent: an existing document is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the default document cannot be written.
    fn ensure(&self) -> Result<()>;

    /// Load the whole document.
    ///
    /// Under [`CorruptionPolicy::Reset`] this never fails.
    ///
    /// # Errors
    ///
    /// Returns `Error::Corrupt` under [`CorruptionPolicy::Fail`].
    fn read(&self) -> Result<Document>;

    /// Replace the whole document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or persisted.
    /// Failures are not retried.
    fn write(&self, document: &Document) -> Result<()>;
}
