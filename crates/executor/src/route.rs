//! Resource routing: (method, resource, id, body) to [`Command`].
//!
//! Routing is pure. It consults the [`Schema`] to tell collections from
//! singletons but never touches the document, so every error produced
//! here is a client error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sitedata_core::{Record, ResourceKind, Schema};

use crate::convert::{BODY_NOT_OBJECT, METHOD_NOT_ALLOWED, MISSING_BODY, MISSING_ID, RESOURCE_NOT_FOUND};
use crate::{Command, Error, Result};

/// Resource name that reads the whole document.
pub const ALL_RESOURCE: &str = "all";
/// Resource name of the job application form.
pub const APPLICATION_RESOURCE: &str = "save-application";

/// Request methods the resource API defines operations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// Read
    Get,
    /// Create, or merge into a singleton
    Post,
    /// Merge-update
    Put,
    /// Remove
    Delete,
}

/// A transport-independent resource request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Request method; `None` for methods the API does not define.
    pub method: Option<Method>,
    /// First path segment below the base path.
    pub resource: Option<String>,
    /// Second path segment below the base path.
    pub id: Option<String>,
    /// Parsed JSON body, if one was sent.
    pub body: Option<Value>,
}

impl Request {
    /// Request with the given method and no path or body.
    pub fn new(method: Method) -> Self {
        Self {
            method: Some(method),
            ..Default::default()
        }
    }

    /// Set the resource segment.
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set the id segment.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Map a request onto the command it names.
///
/// # Errors
///
/// - `NotFound` if the resource is not part of the schema
/// - `BadRequest` if the method/id combination is undefined for the
///   resource, or a required body is missing or not an object
pub fn route(schema: &Schema, request: Request) -> Result<Command> {
    let Request {
        method,
        resource,
        id,
        body,
    } = request;

    let resource = match resource.filter(|r| !r.is_empty()) {
        None => {
            return match (method, id) {
                (Some(Method::Get), None) => Ok(Command::Dump),
                _ => Err(Error::bad_request(METHOD_NOT_ALLOWED)),
            }
        }
        Some(resource) => resource,
    };
    let id = id.filter(|i| !i.is_empty());

    if resource == ALL_RESOURCE {
        return match (method, id) {
            (Some(Method::Get), None) => Ok(Command::Dump),
            _ => Err(Error::bad_request(METHOD_NOT_ALLOWED)),
        };
    }
    if resource == APPLICATION_RESOURCE {
        return match (method, id) {
            (Some(Method::Post), None) => Ok(Command::SubmitApplication {
                fields: object_body(body)?,
            }),
            _ => Err(Error::bad_request(METHOD_NOT_ALLOWED)),
        };
    }

    match schema.kind(&resource) {
        None => Err(Error::not_found(RESOURCE_NOT_FOUND)),
        Some(ResourceKind::Collection) => route_collection(resource, method, id, body),
        Some(ResourceKind::Singleton) => match (method, id) {
            (Some(Method::Get), None) => Ok(Command::SingletonGet { name: resource }),
            (Some(Method::Post | Method::Put), None) => Ok(Command::SingletonMerge {
                name: resource,
                partial: object_body(body)?,
            }),
            _ => Err(Error::bad_request(METHOD_NOT_ALLOWED)),
        },
    }
}

fn route_collection(
    collection: String,
    method: Option<Method>,
    id: Option<String>,
    body: Option<Value>,
) -> Result<Command> {
    match (method, id) {
        (Some(Method::Get), None) => Ok(Command::List { collection }),
        (Some(Method::Get), Some(id)) => Ok(Command::Get { collection, id }),
        (Some(Method::Post), None) => Ok(Command::Append {
            collection,
            record: object_body(body)?,
        }),
        (Some(Method::Put), Some(id)) => Ok(Command::Update {
            collection,
            id,
            partial: object_body(body)?,
        }),
        (Some(Method::Delete), Some(id)) => Ok(Command::Remove { collection, id }),
        (Some(Method::Put | Method::Delete), None) => Err(Error::bad_request(MISSING_ID)),
        _ => Err(Error::bad_request(METHOD_NOT_ALLOWED)),
    }
}

fn object_body(body: Option<Value>) -> Result<Record> {
    match body {
        None | Some(Value::Null) => Err(Error::bad_request(MISSING_BODY)),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(Error::bad_request(BODY_NOT_OBJECT)),
    }
}
