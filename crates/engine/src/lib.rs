//! Database engine for SiteData
//!
//! This crate orchestrates the lower layers:
//! - Database: open/ephemeral constructors and the collection API
//! - Collection operations: list, find, append, update, remove, singleton merge
//! - Configuration: `sitedata.toml`
//!
//! The engine is the only component that knows about the single-writer
//! gate; callers see each operation as atomic.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod database;

pub use database::{Database, SiteDataConfig, CONFIG_FILE_NAME};
