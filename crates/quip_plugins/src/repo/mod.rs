//! Port contracts and SQLite reference implementations.
//!
//! # Responsibility
//! - Define the persistence and lookup contracts the plugin cores consume.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Notice URIs are unique; the store rejects duplicates.
//! - Ports return semantic errors (`DuplicateUri`, `InvalidData`) in
//!   addition to DB transport errors.

pub mod notice_store;
pub mod profile_directory;
