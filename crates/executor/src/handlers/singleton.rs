//! Singleton command handlers.

use sitedata_core::Record;
use sitedata_engine::Database;

use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle SingletonGet command.
pub fn get(db: &Database, name: String) -> Result<Output> {
    let object = convert_result(db.singleton(&name))?;
    Ok(Output::Record(object))
}

/// Handle SingletonMerge command.
pub fn merge(db: &Database, name: String, partial: Record) -> Result<Output> {
    let merged = convert_result(db.merge_singleton(&name, partial))?;
    Ok(Output::Record(merged))
}
