//! The root document, its records, and the schema naming its parts.
//!
//! A [`Document`] is one JSON object. Its top-level keys are either
//! collections (arrays of records) or singletons (merge-updatable objects).
//! Which names exist is decided by a [`Schema`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::stamp::now_iso;

/// One JSON object inside a collection, identified by its `id` field.
pub type Record = Map<String, Value>;

/// Field holding a record's identity.
pub const ID_FIELD: &str = "id";
/// Field stamped when a record is appended.
pub const CREATED_AT_FIELD: &str = "createdAt";
/// Field stamped on every update.
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Client accounts managed from the admin portal.
pub const CLIENTS: &str = "clients";
/// Job applications submitted from the careers page.
pub const JOB_APPLICATIONS: &str = "jobApplications";
/// Service requests from the contact forms.
pub const SERVICE_REQUESTS: &str = "serviceRequests";
/// Aggregate site statistics (singleton).
pub const WEBSITE_STATS: &str = "websiteStats";
/// Portal login accounts.
pub const USER_ACCOUNTS: &str = "userAccounts";
/// Requests filed by clients from their space.
pub const CLIENT_REQUESTS: &str = "clientRequests";

/// Resource names the API answers itself; they can never be collections.
pub const RESERVED_NAMES: [&str; 2] = ["all", "save-application"];

/// Shape of a top-level entry in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Array of records
    Collection,
    /// Single merge-updatable object
    Singleton,
}

/// Ordered set of top-level names a document is allowed to hold.
///
/// The order is the key order of a freshly created document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    entries: Vec<(String, ResourceKind)>,
}

impl Default for Schema {
    fn default() -> Self {
        let entries = [
            (CLIENTS, ResourceKind::Collection),
            (JOB_APPLICATIONS, ResourceKind::Collection),
            (SERVICE_REQUESTS, ResourceKind::Collection),
            (WEBSITE_STATS, ResourceKind::Singleton),
            (USER_ACCOUNTS, ResourceKind::Collection),
            (CLIENT_REQUESTS, ResourceKind::Collection),
        ]
        .into_iter()
        .map(|(name, kind)| (name.to_string(), kind))
        .collect();
        Self { entries }
    }
}

impl Schema {
    /// Default schema extended with additional collection names.
    ///
    /// Names already in the schema and [`RESERVED_NAMES`] are ignored.
    pub fn with_collections<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schema = Self::default();
        for name in extra {
            let name = name.into();
            if schema.kind(&name).is_none() && !RESERVED_NAMES.contains(&name.as_str()) {
                schema.entries.push((name, ResourceKind::Collection));
            }
        }
        schema
    }

    /// Kind of the named entry, if the schema knows it.
    pub fn kind(&self, name: &str) -> Option<ResourceKind> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, kind)| *kind)
    }

    /// True if `name` is a known collection.
    pub fn is_collection(&self, name: &str) -> bool {
        self.kind(name) == Some(ResourceKind::Collection)
    }

    /// True if `name` is a known singleton.
    pub fn is_singleton(&self, name: &str) -> bool {
        self.kind(name) == Some(ResourceKind::Singleton)
    }

    /// Collection names in schema order.
    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, kind)| *kind == ResourceKind::Collection)
            .map(|(name, _)| name.as_str())
    }

    /// Build the document a fresh store starts with.
    pub fn empty_document(&self) -> Document {
        let mut root = Map::new();
        for (name, kind) in &self.entries {
            let value = match kind {
                ResourceKind::Collection => Value::Array(Vec::new()),
                ResourceKind::Singleton => Value::Object(default_singleton(name)),
            };
            root.insert(name.clone(), value);
        }
        Document(root)
    }
}

/// Zeroed content of a singleton.
fn default_singleton(name: &str) -> Map<String, Value> {
    let mut object = Map::new();
    if name == WEBSITE_STATS {
        object.insert("visitors".into(), Value::Array(Vec::new()));
        object.insert("totalVisits".into(), Value::from(0));
        object.insert("uniqueVisitorCount".into(), Value::from(0));
        object.insert("lastUpdated".into(), Value::String(now_iso()));
    }
    object
}

/// The root JSON object persisted by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Wrap a parsed JSON value. The root must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Document(map)),
            other => Err(Error::Serialization(format!(
                "document root must be an object, found {}",
                type_name(&other)
            ))),
        }
    }

    /// Parse a document from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Serialize with two-space indentation.
    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    /// Borrow the root object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Unwrap into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Records of a collection; `None` if absent or not an array.
    pub fn collection(&self, name: &str) -> Option<&Vec<Value>> {
        self.0.get(name).and_then(Value::as_array)
    }

    /// Mutable records of a collection, created empty when absent.
    pub fn collection_mut(&mut self, name: &str) -> Result<&mut Vec<Value>> {
        let entry = self
            .0
            .entry(name.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        match entry {
            Value::Array(items) => Ok(items),
            other => Err(Error::Serialization(format!(
                "{name} is not a collection (found {})",
                type_name(other)
            ))),
        }
    }

    /// Content of a singleton; `None` if absent or not an object.
    pub fn singleton(&self, name: &str) -> Option<&Map<String, Value>> {
        self.0.get(name).and_then(Value::as_object)
    }

    /// Mutable singleton, created empty when absent.
    pub fn singleton_mut(&mut self, name: &str) -> Result<&mut Map<String, Value>> {
        let entry = self
            .0
            .entry(name.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match entry {
            Value::Object(object) => Ok(object),
            other => Err(Error::Serialization(format!(
                "{name} is not an object (found {})",
                type_name(other)
            ))),
        }
    }
}

/// JSON type name for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Index of the record whose `id` equals `id` exactly.
pub fn position_of(records: &[Value], id: &str) -> Option<usize> {
    records
        .iter()
        .position(|r| r.get(ID_FIELD).and_then(Value::as_str) == Some(id))
}
