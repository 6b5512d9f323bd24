//! Domain model shared by the activity and bookmark plugin cores.
//!
//! # Responsibility
//! - Define canonical data structures used by notice composition logic.
//! - Keep one notice-centric shape for both activity and bookmark flows.
//!
//! # Invariants
//! - Every notice is identified by a stable `NoticeId` and a unique URI.
//! - A `BookmarkRecord` never exists without its owning notice.

pub mod bookmark;
pub mod event;
pub mod notice;
pub mod profile;
