//! Test modules for the executor crate.


use serde_json::Value;
use sitedata_core::Record;

/// Unwrap a `json!` object literal into a record.
pub(crate) fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}
