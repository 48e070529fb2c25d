//! Error types for the document store
//!
//! Every layer below the executor reports failures through [`Error`].
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the document store
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backing file exists but does not hold a valid document
    #[error("Corrupt document at {path}: {reason}")]
    Corrupt {
        /// Path of the unreadable file
        path: PathBuf,
        /// Parse or read failure
        reason: String,
    },

    /// Another process holds the document lock
    #[error("Document at {0} is already in use by another process")]
    Locked(PathBuf),

    /// No record with this id in the collection
    #[error("Record {id} not found in {collection}")]
    NotFound {
        /// Collection that was searched
        collection: String,
        /// Id that did not match
        id: String,
    },

    /// Caller supplied something the store cannot accept
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput(reason.into())
    }

    /// Shorthand for [`Error::NotFound`]
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Error::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
