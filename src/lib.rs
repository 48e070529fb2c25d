//! SiteData - JSON document store behind a small resource API
//!
//! SiteData keeps a website's back-office data (clients, job applications,
//! service requests, user accounts, client requests and visit statistics)
//! in a single JSON document and exposes it as named collections.
//!
//! # Quick Start
//!
//! ```ignore
//! use sitedata::{Database, Executor, Method, Request};
//! use serde_json::json;
//!
//! // In-memory store; use Database::open(&config) for a file
//! let executor = Executor::new(Database::ephemeral());
//!
//! let created = executor.handle(
//!     Request::new(Method::Post)
//!         .resource("clients")
//!         .body(json!({"fullName": "Jean Koffi"})),
//! )?;
//! ```
//!
//! # Architecture
//!
//! Requests are routed to a [`Command`] and run by the [`Executor`] against
//! a [`Database`]. Storage and collection internals are not exposed; the
//! HTTP surface lives in the `sitedata-server` crate.

// Re-export the public API from sitedata-executor
pub use sitedata_engine::{Database, SiteDataConfig, CONFIG_FILE_NAME};
pub use sitedata_executor::*;
