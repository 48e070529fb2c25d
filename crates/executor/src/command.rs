//! Command enum defining all store operations.
//!
//! Commands are the "instruction set" of the store. Every operation a
//! client can trigger is represented as a variant of this enum.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON
//! - **Pure data**: No closures or executable code
//!
//! HTTP requests become commands through [`route`](crate::route).

use serde::{Deserialize, Serialize};
use sitedata_core::Record;

/// A command is a self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Commands |
/// |----------|----------|
/// | Document | `Dump` |
/// | Collection | `List`, `Get`, `Append`, `Update`, `Remove` |
/// | Singleton | `SingletonGet`, `SingletonMerge` |
/// | Forms | `SubmitApplication` |
///
/// # Example
///
/// ```ignore
/// use sitedata_executor::Command;
///
/// let cmd = Command::Update {
///     collection: "clients".into(),
///     id: "1718000000000_k3j9x0a2b".into(),
///     partial: serde_json::json!({"status": "inactive"})
///         .as_object()
///         .cloned()
///         .unwrap(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Document ====================
    /// Read the whole root document.
    /// Returns: `Output::Document`
    Dump,

    // ==================== Collection ====================
    /// List a collection in insertion order.
    /// Returns: `Output::Records`
    List {
        /// Collection name
        collection: String,
    },

    /// Read one record.
    /// Returns: `Output::Record`
    Get {
        /// Collection name
        collection: String,
        /// Record id
        id: String,
    },

    /// Append a record; id and `createdAt` are assigned server-side.
    /// Returns: `Output::Created`
    Append {
        /// Collection name
        collection: String,
        /// Client fields of the new record
        record: Record,
    },

    /// Shallow-merge into a record and stamp `updatedAt`.
    /// Returns: `Output::Record`
    Update {
        /// Collection name
        collection: String,
        /// Record id
        id: String,
        /// Fields to overwrite or add
        partial: Record,
    },

    /// Delete a record.
    /// Returns: `Output::Removed`
    Remove {
        /// Collection name
        collection: String,
        /// Record id
        id: String,
    },

    // ==================== Singleton ====================
    /// Read a singleton object.
    /// Returns: `Output::Record`
    SingletonGet {
        /// Singleton name
        name: String,
    },

    /// Shallow-merge into a singleton object.
    /// Returns: `Output::Record`
    SingletonMerge {
        /// Singleton name
        name: String,
        /// Fields to overwrite or add
        partial: Record,
    },

    // ==================== Forms ====================
    /// Validate and store a job application.
    /// Returns: `Output::ApplicationSubmitted`
    SubmitApplication {
        /// Submitted form fields
        fields: Record,
    },
}

impl Command {
    /// Variant name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Dump => "Dump",
            Command::List { .. } => "List",
            Command::Get { .. } => "Get",
            Command::Append { .. } => "Append",
            Command::Update { .. } => "Update",
            Command::Remove { .. } => "Remove",
            Command::SingletonGet { .. } => "SingletonGet",
            Command::SingletonMerge { .. } => "SingletonMerge",
            Command::SubmitApplication { .. } => "SubmitApplication",
        }
    }
}
