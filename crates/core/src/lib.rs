//! Core types and traits for SiteData
//!
//! This crate defines the foundational types used throughout the system:
//! - Document: the root JSON object persisted by a store
//! - Record: one object inside a collection
//! - Schema: the known collection and singleton names
//! - Error: Error type hierarchy
//! - Traits: DocumentStorage, the seam between engine and storage backends
//! - Stamps: server-side timestamps and record ids

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod stamp;
pub mod traits;

pub use document::{
    position_of, type_name, Document, Record, ResourceKind, Schema, CLIENTS, CLIENT_REQUESTS,
    CREATED_AT_FIELD, ID_FIELD, JOB_APPLICATIONS, RESERVED_NAMES, SERVICE_REQUESTS, UPDATED_AT_FIELD,
    USER_ACCOUNTS, WEBSITE_STATS,
};
pub use error::{Error, Result};
pub use stamp::{generate_id, now_iso};
pub use traits::{CorruptionPolicy, DocumentStorage};
