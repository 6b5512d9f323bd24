//! Activity and bookmark plugin cores for the Quip microblogging platform.
//! This crate is the single source of truth for notice-emission rules.

pub mod db;
pub mod dispatch;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod uri;

pub use dispatch::{DispatchError, EventHandler, HookRegistry};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::bookmark::BookmarkRecord;
pub use model::event::{ActivityEvent, EventKind};
pub use model::notice::{AccountId, Notice, NoticeId, NoticeOptions, ObjectType, Source, Verb};
pub use model::profile::{Group, GroupId, Profile, ProfileId};
pub use repo::notice_store::{NoticeStore, SqliteNoticeStore, StoreError, StoreResult};
pub use repo::profile_directory::{ProfileDirectory, SqliteProfileDirectory};
pub use service::activity_service::{ActivityFlags, ActivityNotifier};
pub use service::bookmark_service::{
    canonicalize_tag, BookmarkComposer, BookmarkError, IdentityShortener, TagInput, UrlShortener,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
