//! Notice domain model.
//!
//! # Responsibility
//! - Define the platform's atomic unit of published content.
//! - Define the activity-stream verb and object-type vocabularies.
//!
//! # Invariants
//! - `uri` is globally unique and never reused for another notice.
//! - A notice saved without an explicit verb defaults to `Verb::Post`.

use serde::{Deserialize, Serialize};

/// Stable identifier for a persisted notice.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoticeId = i64;

/// Stable identifier for a registered user account.
pub type AccountId = i64;

/// Controlled vocabulary describing the social action a notice represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    /// Actor started following the object.
    Follow,
    /// Actor stopped following the object.
    Unfollow,
    /// Actor marked the object as a favorite.
    Favor,
    /// Actor removed a favorite mark.
    Unfavorite,
    /// Actor joined the object group.
    Join,
    /// Actor left the object group.
    Leave,
    /// Plain published content. Default verb for host-composed notices.
    Post,
}

impl Verb {
    /// Returns the stable storage form of this verb.
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Unfollow => "unfollow",
            Self::Favor => "favor",
            Self::Unfavorite => "unfavorite",
            Self::Join => "join",
            Self::Leave => "leave",
            Self::Post => "post",
        }
    }

    /// Parses the storage form back into a verb.
    pub fn parse_db(value: &str) -> Option<Self> {
        match value {
            "follow" => Some(Self::Follow),
            "unfollow" => Some(Self::Unfollow),
            "favor" => Some(Self::Favor),
            "unfavorite" => Some(Self::Unfavorite),
            "join" => Some(Self::Join),
            "leave" => Some(Self::Leave),
            "post" => Some(Self::Post),
            _ => None,
        }
    }
}

/// Category of the thing a notice acts upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Person,
    Group,
    Activity,
    Note,
    Comment,
    Image,
    Bookmark,
}

impl ObjectType {
    /// Returns the stable storage form of this object type.
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Group => "group",
            Self::Activity => "activity",
            Self::Note => "note",
            Self::Comment => "comment",
            Self::Image => "image",
            Self::Bookmark => "bookmark",
        }
    }

    /// Parses the storage form back into an object type.
    pub fn parse_db(value: &str) -> Option<Self> {
        match value {
            "person" => Some(Self::Person),
            "group" => Some(Self::Group),
            "activity" => Some(Self::Activity),
            "note" => Some(Self::Note),
            "comment" => Some(Self::Comment),
            "image" => Some(Self::Image),
            "bookmark" => Some(Self::Bookmark),
            _ => None,
        }
    }
}

/// Origin tag recorded on every saved notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Emitted by the activity plugin in reaction to a social-graph event.
    Activity,
    /// Composed through the web surface (bookmark posting included).
    Web,
}

impl Source {
    /// Returns the stable storage form of this source tag.
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Web => "web",
        }
    }

    /// Parses the storage form back into a source tag.
    pub fn parse_db(value: &str) -> Option<Self> {
        match value {
            "activity" => Some(Self::Activity),
            "web" => Some(Self::Web),
            _ => None,
        }
    }
}

/// A published notice: microblog post or activity announcement.
///
/// Immutable from the plugin cores' perspective once saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Stable notice id assigned by the store.
    pub id: NoticeId,
    /// Author profile id.
    pub profile_id: super::profile::ProfileId,
    /// Plain-text content.
    pub content: String,
    /// HTML-rendered content.
    pub rendered: String,
    /// Origin tag (`activity` or `web`).
    pub source: Source,
    /// Social action this notice represents.
    pub verb: Verb,
    /// Category of the acted-upon object, when known.
    pub object_type: Option<ObjectType>,
    /// Globally unique URI, supplied by the triggering relationship or minted.
    pub uri: String,
    /// Referenced URLs.
    pub urls: Vec<String>,
    /// Canonical hashtags.
    pub tags: Vec<String>,
    /// Mentioned-profile URIs.
    pub reply_uris: Vec<String>,
    /// Pass-through visibility scope, host-defined.
    pub scope: Option<i64>,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl Notice {
    /// Returns the best link target for this notice.
    ///
    /// Prefers the first referenced URL and falls back to the notice URI.
    pub fn best_url(&self) -> &str {
        self.urls.first().map(String::as_str).unwrap_or(&self.uri)
    }
}

/// Attribute bag accepted by `NoticeStore::save_new`.
///
/// Fields left at their defaults fall back to store policy: verb becomes
/// `Post` and a missing URI is minted by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeOptions {
    /// HTML-rendered content.
    pub rendered: Option<String>,
    /// Explicit verb; `None` defaults to `Verb::Post`.
    pub verb: Option<Verb>,
    /// Category of the acted-upon object.
    pub object_type: Option<ObjectType>,
    /// Explicit URI; `None` makes the store mint one.
    pub uri: Option<String>,
    /// Referenced URLs.
    pub urls: Vec<String>,
    /// Canonical hashtags.
    pub tags: Vec<String>,
    /// Mentioned-profile URIs.
    pub reply_uris: Vec<String>,
    /// Pass-through visibility scope.
    pub scope: Option<i64>,
}
