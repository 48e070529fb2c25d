//! Error conversion from store error types.
//!
//! This module maps [`sitedata_core::Error`] onto the executor's three-way
//! [`Error`] and owns the client-facing wording of each failure.

use sitedata_core::{CLIENTS, CLIENT_REQUESTS, JOB_APPLICATIONS, SERVICE_REQUESTS, USER_ACCOUNTS};
use tracing::error;

use crate::Error;

/// Unknown resource name.
pub const RESOURCE_NOT_FOUND: &str = "Ressource non trouvée";
/// Method/resource combination with no operation.
pub const METHOD_NOT_ALLOWED: &str = "Méthode non autorisée";
/// Record operation without an id.
pub const MISSING_ID: &str = "ID manquant";
/// Operation that needs a body received none.
pub const MISSING_BODY: &str = "Données manquantes";
/// Body was not a JSON object.
pub const BODY_NOT_OBJECT: &str = "Données invalides : objet JSON attendu";
/// Body was not valid JSON.
pub const INVALID_JSON: &str = "JSON invalide";

/// Client-facing message for a record missing from `collection`.
pub fn not_found_message(collection: &str) -> &'static str {
    match collection {
        CLIENTS => "Client non trouvé",
        JOB_APPLICATIONS => "Candidature non trouvée",
        SERVICE_REQUESTS => "Demande non trouvée",
        USER_ACCOUNTS => "Compte non trouvé",
        CLIENT_REQUESTS => "Demande client non trouvée",
        _ => "Élément non trouvé",
    }
}

/// Convert a store error to an executor Error.
///
/// Caller mistakes keep their message; everything else becomes
/// `Internal` and is logged here, once.
impl From<sitedata_core::Error> for Error {
    fn from(err: sitedata_core::Error) -> Self {
        match err {
            sitedata_core::Error::NotFound { collection, .. } => {
                Error::not_found(not_found_message(&collection))
            }
            sitedata_core::Error::InvalidInput(reason) => Error::bad_request(reason),
            other => {
                error!(target: "sitedata::executor", error = %other, "Store operation failed");
                Error::internal(other.to_string())
            }
        }
    }
}

/// Convert a sitedata_core::Result to an executor Result.
pub fn convert_result<T>(result: sitedata_core::Result<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
