//! # SiteData Executor
//!
//! The resource layer of SiteData: turns resource requests into commands
//! and runs them against a [`Database`](sitedata_engine::Database).
//!
//! - [`route`] - maps (method, resource, id, body) to a [`Command`]
//! - [`Executor`] - executes commands, producing an [`Output`] or an [`Error`]
//!
//! ## Quick Start
//!
//! ```text
//! use sitedata_executor::{Executor, Method, Request};
//! use sitedata_engine::Database;
//!
//! let executor = Executor::new(Database::ephemeral());
//!
//! let created = executor.handle(
//!     Request::new(Method::Post)
//!         .resource("clients")
//!         .body(json!({"name": "Acme"})),
//! )?;
//! ```
//!
//! ## Resources
//!
//! | Resource | Kind |
//! |----------|------|
//! | `clients`, `jobApplications`, `serviceRequests`, `userAccounts`, `clientRequests` | collection |
//! | `websiteStats` | singleton |
//! | `all` | whole document |
//! | `save-application` | job application form |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod convert;
mod error;
mod executor;
mod output;
mod route;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

pub use command::Command;
pub use convert::{
    not_found_message, BODY_NOT_OBJECT, INVALID_JSON, METHOD_NOT_ALLOWED, MISSING_BODY, MISSING_ID,
    RESOURCE_NOT_FOUND,
};
pub use error::{Error, INTERNAL_MESSAGE};
pub use executor::Executor;
pub use handlers::application::{PENDING_STATUS, REQUIRED_FIELDS};
pub use output::{Output, APPLICATION_MESSAGE, DELETED_MESSAGE};
pub use route::{route, Method, Request, ALL_RESOURCE, APPLICATION_RESOURCE};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
