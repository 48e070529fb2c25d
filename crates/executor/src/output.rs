//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is
//! deterministic: the same command always produces the same output variant
//! (though the values may differ based on document state).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sitedata_core::Record;

/// Confirmation attached to a removal.
pub const DELETED_MESSAGE: &str = "Item deleted successfully";
/// Confirmation attached to a stored job application.
pub const APPLICATION_MESSAGE: &str = "Candidature enregistrée avec succès";

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output`
/// variant, documented on the command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Whole root document
    Document(Value),

    /// Records of one collection
    Records(Vec<Value>),

    /// One record or singleton, read or updated
    Record(Record),

    /// Freshly appended record
    Created(Record),

    /// Record that was just removed
    Removed(Record),

    /// Stored job application
    ApplicationSubmitted(Record),
}

impl Output {
    /// True if the output reports a newly created record.
    pub fn is_created(&self) -> bool {
        matches!(self, Output::Created(_) | Output::ApplicationSubmitted(_))
    }

    /// Human-readable confirmation, if the operation has one.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Output::Removed(_) => Some(DELETED_MESSAGE),
            Output::ApplicationSubmitted(_) => Some(APPLICATION_MESSAGE),
            _ => None,
        }
    }

    /// Payload as plain JSON.
    pub fn into_data(self) -> Value {
        match self {
            Output::Document(value) => value,
            Output::Records(records) => Value::Array(records),
            Output::Record(record)
            | Output::Created(record)
            | Output::Removed(record)
            | Output::ApplicationSubmitted(record) => Value::Object(record),
        }
    }
}
