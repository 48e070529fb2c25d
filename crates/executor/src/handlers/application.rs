//! Job application form handler.
//!
//! Applications land in `jobApplications` like any appended record, after
//! the required contact fields are checked. `submittedAt` and `status` are
//! always set here; a client-supplied `id` is dropped so the store assigns
//! one.

use serde_json::Value;
use sitedata_core::{now_iso, Record, ID_FIELD, JOB_APPLICATIONS};
use sitedata_engine::Database;

use crate::convert::convert_result;
use crate::{Error, Output, Result};

/// Fields an application must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 4] = ["fullName", "email", "phone", "position"];

/// Status given to every new application.
pub const PENDING_STATUS: &str = "pending";

/// Handle SubmitApplication command.
pub fn submit(db: &Database, mut fields: Record) -> Result<Output> {
    let missing = missing_fields(&fields);
    if !missing.is_empty() {
        return Err(Error::bad_request(format!(
            "Champs obligatoires manquants: {}",
            missing.join(", ")
        )));
    }

    fields.shift_remove(ID_FIELD);
    fields.insert("submittedAt".to_string(), Value::String(now_iso()));
    fields.insert("status".to_string(), Value::String(PENDING_STATUS.to_string()));

    let stored = convert_result(db.append(JOB_APPLICATIONS, fields))?;
    let id = stored
        .get(ID_FIELD)
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    tracing::info!(target: "sitedata::executor", id = %id, "Job application stored");
    Ok(Output::ApplicationSubmitted(stored))
}

/// Required fields that are absent or carry no value: null, `false`,
/// zero, or a blank string.
fn missing_fields(fields: &Record) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .into_iter()
        .filter(|name| match fields.get(*name) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => true,
            Some(Value::Number(n)) => n.as_f64() == Some(0.0),
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        })
        .collect()
}
