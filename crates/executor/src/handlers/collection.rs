//! Collection command handlers.

use serde_json::Value;
use sitedata_core::Record;
use sitedata_engine::Database;

use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle Dump command.
pub fn dump(db: &Database) -> Result<Output> {
    let document = convert_result(db.document())?;
    Ok(Output::Document(document.into_value()))
}

/// Handle List command.
pub fn list(db: &Database, collection: String) -> Result<Output> {
    let records: Vec<Value> = convert_result(db.list(&collection))?;
    Ok(Output::Records(records))
}

/// Handle Get command.
pub fn get(db: &Database, collection: String, id: String) -> Result<Output> {
    let record = convert_result(db.get(&collection, &id))?;
    Ok(Output::Record(record))
}

/// Handle Append command.
pub fn append(db: &Database, collection: String, record: Record) -> Result<Output> {
    let stored = convert_result(db.append(&collection, record))?;
    Ok(Output::Created(stored))
}

/// Handle Update command.
pub fn update(db: &Database, collection: String, id: String, partial: Record) -> Result<Output> {
    let updated = convert_result(db.update(&collection, &id, partial))?;
    Ok(Output::Record(updated))
}

/// Handle Remove command.
pub fn remove(db: &Database, collection: String, id: String) -> Result<Output> {
    let removed = convert_result(db.remove(&collection, &id))?;
    Ok(Output::Removed(removed))
}
