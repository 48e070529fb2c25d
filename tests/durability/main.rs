//! Integration tests for the file-backed store.
//!
//! These exercise the document file across a real open, write, close and
//! reopen lifecycle, which unit tests on the storage layer cannot.

#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod corruption;
mod lifecycle;
