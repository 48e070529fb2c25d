//! Error types for command execution.
//!
//! All errors from routing and command execution are represented by the
//! [`Error`] enum. These errors are:
//! - **Structured**: Each variant carries the message shown to clients
//! - **Serializable**: Can be converted to/from JSON
//! - **Coarse**: Exactly the three outcomes an HTTP client can act on

use serde::{Deserialize, Serialize};

/// Message returned to clients in place of internal error details.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Command execution errors.
///
/// # Categories
///
/// | Variant | Cause | HTTP |
/// |---------|-------|------|
/// | `NotFound` | unknown resource or record | 404 |
/// | `BadRequest` | malformed body, missing id, undefined method | 400 |
/// | `Internal` | storage read/write failure | 500 |
///
/// # Example
///
/// ```ignore
/// use sitedata_executor::{Command, Error, Executor};
///
/// match executor.execute(cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::NotFound { message }) => {
///         println!("{}", message);
///     }
///     Err(e) => {
///         println!("Error: {}", e);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// Resource or record does not exist
    #[error("{message}")]
    NotFound {
        /// Client-facing description
        message: String,
    },

    /// Input the store cannot act on
    #[error("{reason}")]
    BadRequest {
        /// Client-facing description
        reason: String,
    },

    /// Storage failure (bug, I/O, corrupt document)
    #[error("internal error: {reason}")]
    Internal {
        /// Details for logs, never sent to clients
        reason: String,
    },
}

impl Error {
    /// Shorthand for [`Error::NotFound`]
    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::BadRequest`]
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Error::BadRequest {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::Internal`]
    pub fn internal(reason: impl Into<String>) -> Self {
        Error::Internal {
            reason: reason.into(),
        }
    }

    /// Text safe to show a client. Internal details are replaced by
    /// [`INTERNAL_MESSAGE`].
    pub fn public_message(&self) -> String {
        match self {
            Error::NotFound { message } => message.clone(),
            Error::BadRequest { reason } => reason.clone(),
            Error::Internal { .. } => INTERNAL_MESSAGE.to_string(),
        }
    }
}
