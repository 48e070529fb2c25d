//! Response envelope shared by every endpoint.
//!
//! ```json
//! { "success": true, "data": { ... }, "message": "Item deleted successfully" }
//! { "success": false, "error": "Client non trouvé" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sitedata_executor::{Error, Output};

/// JSON body of every resource API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Operation payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Client-facing failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Confirmation text for some successful operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    /// Successful envelope around `data`.
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Failed envelope carrying `error`.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

/// Successful command output, rendered with its status code.
#[derive(Debug)]
pub struct ApiOutput(pub Output);

impl IntoResponse for ApiOutput {
    fn into_response(self) -> Response {
        let status = if self.0.is_created() {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };
        let message = self.0.message().map(str::to_string);
        let body = Envelope {
            message,
            ..Envelope::ok(self.0.into_data())
        };
        (status, Json(body)).into_response()
    }
}

/// Failed command, rendered with its status code.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    /// Status code the error maps to.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(Envelope::failure(self.0.public_message()))).into_response()
    }
}
