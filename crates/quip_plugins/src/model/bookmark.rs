//! Bookmark metadata attached to a notice.

use super::notice::NoticeId;
use serde::{Deserialize, Serialize};

/// Marks one notice as a bookmark and carries its page metadata.
///
/// One-to-one with its owning notice, keyed by the notice id. Created only
/// after the notice exists; removed by cascading deletion of the notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    /// Owning notice id, also the primary key.
    pub notice_id: NoticeId,
    /// Bookmark title, stored verbatim.
    pub title: String,
    /// Bookmark description, stored verbatim.
    pub description: String,
}
