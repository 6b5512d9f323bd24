//! Plugin-core use-case services.
//!
//! # Responsibility
//! - Orchestrate port calls into the activity and bookmark use-case APIs.
//! - Keep the host pipeline decoupled from storage details.

pub mod activity_service;
pub mod bookmark_service;
