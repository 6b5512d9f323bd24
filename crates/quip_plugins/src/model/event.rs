//! Transient social-graph events consumed by the activity plugin.
//!
//! # Responsibility
//! - Carry the actor/target entities of one social-graph change.
//! - Map each event to the enumerated kind used as the dispatch-table key.
//!
//! # Invariants
//! - Events are never persisted by the plugin cores.
//! - Relationship URIs travel with the events that still have a
//!   relationship row (follow/favorite/join); the stop variants do not.

use super::notice::Notice;
use super::profile::{Group, Profile};
use std::fmt::{Display, Formatter};

/// Enumerated event-kind tag used to key the hook dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    FollowStarted,
    FollowStopped,
    FavoriteAdded,
    FavoriteRemoved,
    GroupJoined,
    GroupLeft,
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FollowStarted => "follow_started",
            Self::FollowStopped => "follow_stopped",
            Self::FavoriteAdded => "favorite_added",
            Self::FavoriteRemoved => "favorite_removed",
            Self::GroupJoined => "group_joined",
            Self::GroupLeft => "group_left",
        };
        f.write_str(name)
    }
}

/// One social-graph change, as delivered by the host pipeline.
#[derive(Debug, Clone)]
pub enum ActivityEvent {
    /// A profile started following another profile.
    FollowStarted {
        follower: Profile,
        followed: Profile,
        /// URI of the subscription relationship the host keeps.
        subscription_uri: String,
    },
    /// A profile stopped following another profile.
    FollowStopped { follower: Profile, followed: Profile },
    /// A profile marked a notice as favorite.
    FavoriteAdded {
        actor: Profile,
        notice: Notice,
        /// Author of the favorited notice.
        author: Profile,
        /// URI of the favorite relationship the host keeps.
        favorite_uri: String,
    },
    /// A profile removed a favorite mark from a notice.
    FavoriteRemoved {
        actor: Profile,
        notice: Notice,
        author: Profile,
    },
    /// A profile joined a group.
    GroupJoined {
        member: Profile,
        group: Group,
        /// URI of the membership relationship the host keeps.
        membership_uri: String,
    },
    /// A profile left a group.
    GroupLeft { member: Profile, group: Group },
}

impl ActivityEvent {
    /// Returns the enumerated kind tag for dispatch-table lookup.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::FollowStarted { .. } => EventKind::FollowStarted,
            Self::FollowStopped { .. } => EventKind::FollowStopped,
            Self::FavoriteAdded { .. } => EventKind::FavoriteAdded,
            Self::FavoriteRemoved { .. } => EventKind::FavoriteRemoved,
            Self::GroupJoined { .. } => EventKind::GroupJoined,
            Self::GroupLeft { .. } => EventKind::GroupLeft,
        }
    }
}
