//! Storage backends for the SiteData document
//!
//! This crate implements [`DocumentStorage`](sitedata_core::DocumentStorage) with:
//! - JsonFileStorage: one pretty-printed JSON file, crash-safe replace,
//!   exclusive process lock
//! - MemoryStorage: in-process document for ephemeral runs and tests

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod file;
pub mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;
