//! # SiteData Server
//!
//! HTTP surface of the SiteData store, built on axum.
//!
//! Endpoints, relative to the configured base path (default `/api`):
//! - GET    /                  - whole document
//! - GET    /all               - whole document
//! - GET    /:resource         - list a collection or read a singleton
//! - GET    /:resource/:id     - read a record
//! - POST   /:resource         - append a record or merge a singleton
//! - PUT    /:resource         - merge a singleton
//! - PUT    /:resource/:id     - merge-update a record
//! - DELETE /:resource/:id     - remove a record
//! - POST   /save-application  - submit a job application
//!
//! A trailing slash is accepted on every path. Every response body is an
//! [`Envelope`], including axum's own extractor rejections. Any `OPTIONS`
//! request is answered with an empty 200 without touching the store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod envelope;

use std::io;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method as HttpMethod, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::Value;
use sitedata_executor::{Error, Executor, Method, Request, APPLICATION_RESOURCE, INVALID_JSON};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info, warn};

pub use envelope::{ApiError, ApiOutput, Envelope};

/// Path segment that is not valid UTF-8 after percent-decoding.
pub const INVALID_PATH: &str = "URL invalide";
/// Body over the extractor's size limit.
pub const BODY_TOO_LARGE: &str = "Données trop volumineuses";

/// Shared handler state.
#[derive(Clone)]
struct AppState {
    executor: Executor,
}

/// Build the axum router serving the resource API under `base_path`.
///
/// `base_path` is used as given; pass it without a trailing slash
/// (`""` mounts the API at the root).
pub fn router(executor: Executor, base_path: &str) -> Router {
    let state = AppState { executor };
    let root = if base_path.is_empty() { "/" } else { base_path };

    let mut app = Router::new().route(root, any(document_root));
    if !base_path.is_empty() {
        app = app.route(&format!("{base_path}/"), any(document_root));
    }

    let application_path = format!("{base_path}/{APPLICATION_RESOURCE}");
    app.route(&application_path, any(application))
        .route(&format!("{application_path}/"), any(application))
        .route(&format!("{base_path}/:resource"), any(resource))
        .route(&format!("{base_path}/:resource/"), any(resource))
        .route(&format!("{base_path}/:resource/:id"), any(record))
        .route(&format!("{base_path}/:resource/:id/"), any(record))
        .fallback(not_found)
        .layer(cors())
        .with_state(state)
}

/// Permissive CORS for browser front-ends served from anywhere.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            HttpMethod::GET,
            HttpMethod::POST,
            HttpMethod::PUT,
            HttpMethod::DELETE,
            HttpMethod::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// Bind `bind` and serve until Ctrl+C or SIGTERM.
pub async fn serve(executor: Executor, bind: &str, base_path: &str) -> io::Result<()> {
    let app = router(executor, base_path);

    let listener = TcpListener::bind(bind).await?;
    info!(target: "sitedata::http", address = %listener.local_addr()?, base_path, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(target: "sitedata::http", "Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!(target: "sitedata::http", "Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(target: "sitedata::http", error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!(target: "sitedata::http", "Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(target: "sitedata::http", error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

// ── Handlers ────────────────────────────────────────────────────────

async fn document_root(
    State(state): State<AppState>,
    method: HttpMethod,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    dispatch(state, method, None, None, body).await
}

async fn application(
    State(state): State<AppState>,
    method: HttpMethod,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let resource = Some(APPLICATION_RESOURCE.to_string());
    dispatch(state, method, resource, None, body).await
}

async fn resource(
    State(state): State<AppState>,
    method: HttpMethod,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match path {
        Ok(Path(resource)) => dispatch(state, method, Some(resource), None, body).await,
        Err(rejection) => path_rejected(rejection),
    }
}

async fn record(
    State(state): State<AppState>,
    method: HttpMethod,
    path: Result<Path<(String, String)>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match path {
        Ok(Path((resource, id))) => dispatch(state, method, Some(resource), Some(id), body).await,
        Err(rejection) => path_rejected(rejection),
    }
}

fn path_rejected(rejection: PathRejection) -> Response {
    debug!(target: "sitedata::http", error = %rejection.body_text(), "Rejected path");
    ApiError(Error::bad_request(INVALID_PATH)).into_response()
}

/// Oversized bodies keep their 413; any other unreadable body is a 400.
fn body_rejected(rejection: BytesRejection) -> Response {
    debug!(target: "sitedata::http", error = %rejection.body_text(), "Rejected body");
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(Envelope::failure(BODY_TOO_LARGE)),
        )
            .into_response(),
        _ => ApiError(Error::bad_request(INVALID_JSON)).into_response(),
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(Envelope::failure("Not found"))).into_response()
}

/// Parse, route and execute one request.
async fn dispatch(
    state: AppState,
    method: HttpMethod,
    resource: Option<String>,
    id: Option<String>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if method == HttpMethod::OPTIONS {
        return StatusCode::OK.into_response();
    }
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejected(rejection),
    };

    let method = to_method(&method);
    let body = if matches!(method, Some(Method::Post | Method::Put)) {
        match parse_body(&body) {
            Ok(body) => body,
            Err(e) => return e.into_response(),
        }
    } else {
        None
    };

    let request = Request {
        method,
        resource,
        id,
        body,
    };
    debug!(
        target: "sitedata::http",
        method = ?request.method,
        resource = ?request.resource,
        id = ?request.id,
        "Request"
    );

    let executor = state.executor.clone();
    match tokio::task::spawn_blocking(move || executor.handle(request)).await {
        Ok(Ok(output)) => ApiOutput(output).into_response(),
        Ok(Err(e)) => ApiError(e).into_response(),
        Err(join_error) => {
            error!(target: "sitedata::http", error = %join_error, "Request handler panicked");
            ApiError(Error::internal(join_error.to_string())).into_response()
        }
    }
}

fn to_method(method: &HttpMethod) -> Option<Method> {
    match *method {
        HttpMethod::GET => Some(Method::Get),
        HttpMethod::POST => Some(Method::Post),
        HttpMethod::PUT => Some(Method::Put),
        HttpMethod::DELETE => Some(Method::Delete),
        _ => None,
    }
}

/// Empty or whitespace-only bodies count as no body.
fn parse_body(body: &[u8]) -> Result<Option<Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|_| ApiError(Error::bad_request(INVALID_JSON)))
}
